use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

use snake_common::config::WatchSettings;
use snake_common::games::SessionRng;
use snake_common::games::snake::{
    Direction, GameMode, Point, PlayerSubscription, PoolRunner, SharedPool, SimulationPool,
    SnakeSettings,
};
use snake_common::id_generator::generate_player_name;
use snake_common::{log, PlayerId};

/// Owns the watch feed: the pool, its ticking task and any log subscriptions.
pub struct WatchService {
    pool: SharedPool,
    runner: Option<PoolRunner>,
    subscriptions: Vec<PlayerSubscription>,
    tick_interval: Duration,
}

impl WatchService {
    pub fn new(settings: SnakeSettings, watch: &WatchSettings, rng: &mut SessionRng) -> Self {
        let mut pool = SimulationPool::with_sample_players(settings, watch.turn_probability, rng);

        let margin = (settings.initial_length as i32).min(settings.grid_size / 2 - 1);
        for _ in 0..watch.extra_players {
            let head = Point::new(
                rng.random_range(margin..settings.grid_size - margin),
                rng.random_range(margin..settings.grid_size - margin),
            );
            let direction = rng.choose(&Direction::ALL).unwrap_or(Direction::Right);
            let mode = if rng.random_bool() { GameMode::Walls } else { GameMode::PassThrough };
            let name = generate_player_name();
            let id = pool.add_player(&name, mode, head, direction, 0, None, rng);
            log!("Added watch player {} ({})", name, id);
        }

        Self {
            pool: Arc::new(Mutex::new(pool)),
            runner: None,
            subscriptions: Vec::new(),
            tick_interval: Duration::from_millis(watch.tick_interval_ms),
        }
    }

    pub fn start(&mut self, rng: SessionRng) {
        if self.runner.is_some() {
            return;
        }
        self.runner = Some(PoolRunner::start(self.pool.clone(), self.tick_interval, rng));
    }

    /// Logs the player's score whenever it changes.
    pub fn follow(&mut self, player_id: PlayerId) {
        let last_score = Arc::new(AtomicU32::new(u32::MAX));
        let subscription = PlayerSubscription::subscribe(
            self.pool.clone(),
            player_id,
            self.tick_interval,
            move |player| {
                if last_score.swap(player.score, Ordering::Relaxed) != player.score {
                    log!(
                        "[watch] {} ({:?}) score {} length {}",
                        player.username,
                        player.mode,
                        player.score,
                        player.snake.len()
                    );
                }
            },
        );
        self.subscriptions.push(subscription);
    }

    pub async fn report(&self) {
        let pool = self.pool.lock().await;
        for player in pool.active_players() {
            if let Some(head) = player.snake.first() {
                log!(
                    "[watch] {} {:?} score {} at ({}, {})",
                    player.username,
                    player.mode,
                    player.score,
                    head.x,
                    head.y
                );
            }
        }
    }

    pub async fn stop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe().await;
        }
        if let Some(runner) = self.runner.take() {
            runner.stop().await;
        }
    }
}
