mod bot_controller;
mod server_config;
mod watch_service;

use std::sync::{Arc, PoisonError};

use clap::Parser;
use tokio::sync::Mutex;

use snake_common::config::{ArcadeConfig, ConfigManager, FileContentConfigProvider, YamlConfigSerializer};
use snake_common::games::SessionRng;
use snake_common::games::snake::{GameSession, GameStatus, SessionRunner, SharedSession, TickOutcome};
use snake_common::high_score::{FileHighScoreStore, HighScoreStore, InMemoryHighScoreStore};
use snake_common::leaderboard::Leaderboard;
use snake_common::{log, log_warn, logger, PlayerId};

use bot_controller::BotController;
use server_config::{DEFAULT_CONFIG_PATH, DEMO_PLAYER_NAME, LEADERBOARD_REPORT_SIZE, STATUS_REPORT_INTERVAL};
use watch_service::WatchService;

#[derive(Parser)]
#[command(name = "snake_arcade_server")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,

    /// Overrides the configured watch-feed seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Watch-feed player whose score changes are logged.
    #[arg(long, default_value = "player1")]
    follow: String,

    /// Write the effective config back to --config and exit.
    #[arg(long)]
    write_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Arcade".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager =
        ConfigManager::<FileContentConfigProvider, ArcadeConfig, YamlConfigSerializer>::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    if let Some(seed) = args.seed {
        config.watch.seed = Some(seed);
    }

    if args.write_config {
        config_manager.set_config(&config)?;
        log!("Config written to {}", args.config);
        return Ok(());
    }

    let mut watch_rng = SessionRng::from_optional_seed(config.watch.seed);
    log!("Watch feed seed: {}", watch_rng.seed());

    let mut watch = WatchService::new(config.snake, &config.watch, &mut watch_rng);
    watch.start(watch_rng);
    watch.follow(PlayerId::new(args.follow.clone()));

    let store: Box<dyn HighScoreStore> = match &config.high_score_path {
        Some(path) => Box::new(FileHighScoreStore::new(path)),
        None => Box::new(InMemoryHighScoreStore::default()),
    };
    let session = Arc::new(Mutex::new(GameSession::new(
        config.snake,
        config.default_mode,
        store,
        SessionRng::from_random(),
    )?));
    let leaderboard = Arc::new(std::sync::Mutex::new(Leaderboard::with_sample_entries()));

    session.lock().await.start();
    let runner = start_demo_session(session.clone(), leaderboard.clone());

    let mut report_timer = tokio::time::interval(STATUS_REPORT_INTERVAL);
    report_timer.tick().await;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log!("Shutdown signal received, stopping simulation...");
                break;
            }
            _ = report_timer.tick() => {
                watch.report().await;
                let session = session.lock().await;
                log!("[demo] score {} high score {}", session.score(), session.high_score());
            }
        }
    }

    runner.stop().await;
    watch.stop().await;

    let board = leaderboard.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(entries) = board.list(None).data {
        for (rank, entry) in entries.iter().take(LEADERBOARD_REPORT_SIZE).enumerate() {
            log!("#{} {} {} ({:?})", rank + 1, entry.username, entry.score, entry.mode);
        }
    }

    log!("Server shut down gracefully");
    Ok(())
}

/// Plays the human session with the autopilot. Finished games are submitted
/// to the leaderboard and restarted before the session lock is released.
fn start_demo_session(
    session: SharedSession,
    leaderboard: Arc<std::sync::Mutex<Leaderboard>>,
) -> SessionRunner {
    SessionRunner::start(session, move |outcome, session| {
        if outcome.is_terminal() {
            let (score, mode) = (session.score(), session.mode());
            let response = leaderboard
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .submit(DEMO_PLAYER_NAME, score, mode);
            if !response.success {
                log_warn!("Failed to submit demo score: {:?}", response.error);
            }
            session.start();
            return;
        }

        if outcome == TickOutcome::AteFood {
            log!("[demo] ate food, score {}", session.score());
        }
        if session.status() == GameStatus::Playing
            && let Some(direction) = BotController::calculate_move(session.entity())
        {
            session.set_direction(direction);
        }
    })
}
