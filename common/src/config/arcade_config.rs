use serde::{Deserialize, Serialize};

use crate::games::snake::{GameMode, SnakeSettings, DEFAULT_TURN_PROBABILITY};
use super::Validate;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    pub tick_interval_ms: u64,
    pub turn_probability: f64,
    /// Random players added on top of the three sample ones.
    pub extra_players: usize,
    pub seed: Option<u64>,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 150,
            turn_probability: DEFAULT_TURN_PROBABILITY,
            extra_players: 0,
            seed: None,
        }
    }
}

impl Validate for WatchSettings {
    fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms < 10 || self.tick_interval_ms > 5000 {
            return Err("Watch tick interval must be between 10ms and 5000ms".to_string());
        }
        if !(0.0..=1.0).contains(&self.turn_probability) {
            return Err("Turn probability must be between 0.0 and 1.0".to_string());
        }
        if self.extra_players > 50 {
            return Err("At most 50 extra watch players are supported".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub snake: SnakeSettings,
    pub watch: WatchSettings,
    pub default_mode: GameMode,
    /// Missing means the high score only lives in memory.
    pub high_score_path: Option<String>,
}

impl Validate for ArcadeConfig {
    fn validate(&self) -> Result<(), String> {
        self.snake.validate()?;
        self.watch.validate()?;
        if let Some(path) = &self.high_score_path
            && path.trim().is_empty()
        {
            return Err("High score path must not be empty".to_string());
        }
        Ok(())
    }
}
