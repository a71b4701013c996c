use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};

use crate::games::SessionRng;
use crate::{log, PlayerId};
use super::pool::{ActivePlayer, SimulationPool};
use super::session::GameSession;
use super::types::TickOutcome;

pub type SharedPool = Arc<Mutex<SimulationPool>>;
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Background task handle. `stop` returns only after the task has exited, so
/// no tick or callback runs afterwards.
struct StoppableTask {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl StoppableTask {
    fn spawn<F, Fut>(body: F) -> Self
    where
        F: FnOnce(oneshot::Receiver<()>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(body(stop_rx));
        Self {
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        let _ = self.handle.await;
    }

    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

fn fixed_interval(period: Duration) -> tokio::time::Interval {
    let mut timer = interval(period);
    // Late frames collapse into one tick instead of bursting.
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

/// Drives a `SimulationPool` on a fixed interval.
pub struct PoolRunner {
    task: StoppableTask,
}

impl PoolRunner {
    pub fn start(pool: SharedPool, period: Duration, mut rng: SessionRng) -> Self {
        log!("Watch feed started, tick every {}ms", period.as_millis());
        let task = StoppableTask::spawn(move |mut stop_rx| async move {
            let mut timer = fixed_interval(period);
            timer.tick().await;

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = timer.tick() => {
                        let mut pool = pool.lock().await;
                        pool.tick(&mut rng);
                    }
                }
            }
        });

        Self { task }
    }

    pub async fn stop(self) {
        self.task.stop().await;
        log!("Watch feed stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

/// Periodic delivery of one pool player's state to a callback. Missing players
/// are skipped silently.
pub struct PlayerSubscription {
    player_id: PlayerId,
    task: StoppableTask,
}

impl PlayerSubscription {
    pub fn subscribe<F>(pool: SharedPool, player_id: PlayerId, period: Duration, mut callback: F) -> Self
    where
        F: FnMut(ActivePlayer) + Send + 'static,
    {
        let watched = player_id.clone();
        let task = StoppableTask::spawn(move |mut stop_rx| async move {
            let mut timer = fixed_interval(period);
            timer.tick().await;

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = timer.tick() => {
                        let player = pool.lock().await.player(&watched).data;
                        if let Some(player) = player {
                            callback(player);
                        }
                    }
                }
            }
        });

        Self { player_id, task }
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub async fn unsubscribe(self) {
        self.task.stop().await;
    }
}

/// Drives the human `GameSession`. The wait before each tick follows the
/// session's current speed, so eating food speeds up the loop.
///
/// `on_tick` runs under the same lock as the tick, so it can steer or restart
/// the session before anyone else observes the outcome.
pub struct SessionRunner {
    task: StoppableTask,
}

impl SessionRunner {
    pub fn start<F>(session: SharedSession, mut on_tick: F) -> Self
    where
        F: FnMut(TickOutcome, &mut GameSession) + Send + 'static,
    {
        let task = StoppableTask::spawn(move |mut stop_rx| async move {
            loop {
                let period = Duration::from_millis(session.lock().await.speed());
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = sleep(period) => {
                        let mut session = session.lock().await;
                        let outcome = session.tick();
                        if outcome != TickOutcome::Skipped {
                            on_tick(outcome, &mut session);
                        }
                    }
                }
            }
        });

        Self { task }
    }

    pub async fn stop(self) {
        self.task.stop().await;
    }
}
