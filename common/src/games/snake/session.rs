use crate::config::Validate;
use crate::games::SessionRng;
use crate::high_score::HighScoreStore;
use crate::{log, log_warn};
use super::settings::SnakeSettings;
use super::entity::{RenderSnapshot, SnakeEntity};
use super::tick_engine;
use super::types::{Direction, GameMode, GameStatus, TickOutcome};

/// The interactive player's game. Owns the high score; nothing else writes it.
pub struct GameSession {
    entity: SnakeEntity,
    high_score: u32,
    store: Box<dyn HighScoreStore>,
    rng: SessionRng,
}

impl GameSession {
    pub fn new(
        settings: SnakeSettings,
        mode: GameMode,
        store: Box<dyn HighScoreStore>,
        mut rng: SessionRng,
    ) -> Result<Self, String> {
        settings.validate()?;

        let high_score = match store.load() {
            Ok(score) => score,
            Err(e) => {
                log_warn!("Failed to load high score, starting from 0: {}", e);
                0
            }
        };
        let entity = SnakeEntity::new(settings, mode, &mut rng);

        Ok(Self {
            entity,
            high_score,
            store,
            rng,
        })
    }

    pub fn entity(&self) -> &SnakeEntity {
        &self.entity
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn score(&self) -> u32 {
        self.entity.score
    }

    pub fn status(&self) -> GameStatus {
        self.entity.status
    }

    pub fn mode(&self) -> GameMode {
        self.entity.mode
    }

    pub fn speed(&self) -> u64 {
        self.entity.speed
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.entity.snapshot()
    }

    pub fn start(&mut self) {
        self.entity.start(&mut self.rng);
        log!("Game started in {:?} mode", self.entity.mode);
    }

    pub fn pause(&mut self) {
        self.entity.pause();
    }

    pub fn resume(&mut self) {
        self.entity.resume();
    }

    pub fn reset(&mut self) {
        self.entity.reset(&mut self.rng);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.entity.set_direction(direction);
    }

    /// Applies immediately in any status. Locking the mode during play is a
    /// UI decision.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.entity.set_mode(mode);
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = tick_engine::tick(&mut self.entity, &mut self.rng);

        match outcome {
            TickOutcome::AteFood => {
                let head = self.entity.head();
                log!("Food eaten at ({}, {}), score {}", head.x, head.y, self.entity.score);
                self.raise_high_score();
            }
            TickOutcome::WallCollision | TickOutcome::SelfCollision => {
                log!(
                    "Game over ({:?}) with score {} at ({}, {})",
                    outcome,
                    self.entity.score,
                    self.entity.head().x,
                    self.entity.head().y
                );
                self.raise_high_score();
            }
            TickOutcome::Moved | TickOutcome::Skipped => {}
        }

        outcome
    }

    fn raise_high_score(&mut self) {
        if self.entity.score <= self.high_score {
            return;
        }

        self.high_score = self.entity.score;
        log!("New high score: {}", self.high_score);
        if let Err(e) = self.store.save(self.high_score) {
            log_warn!("Failed to save high score {}: {}", self.high_score, e);
        }
    }

    #[cfg(test)]
    fn entity_mut(&mut self) -> &mut SnakeEntity {
        &mut self.entity
    }
}
