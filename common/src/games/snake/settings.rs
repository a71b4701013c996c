use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{Direction, Point};

/// Board and pacing rules shared by the player session and the watch feed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub grid_size: i32,
    pub base_speed_ms: u64,
    pub min_speed_ms: u64,
    pub speed_step_ms: u64,
    pub score_per_speed_step: u32,
    pub food_score: u32,
    pub initial_head: Point,
    pub initial_direction: Direction,
    pub initial_length: usize,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_size: 20,
            base_speed_ms: 150,
            min_speed_ms: 50,
            speed_step_ms: 10,
            score_per_speed_step: 50,
            food_score: 10,
            initial_head: Point::new(10, 10),
            initial_direction: Direction::Right,
            initial_length: 3,
        }
    }
}

impl SnakeSettings {
    /// Tick interval for a given score: one step faster per
    /// `score_per_speed_step` points, never below `min_speed_ms`.
    pub fn speed_for_score(&self, score: u32) -> u64 {
        let steps = u64::from(score / self.score_per_speed_step.max(1));
        self.base_speed_ms
            .saturating_sub(steps.saturating_mul(self.speed_step_ms))
            .max(self.min_speed_ms)
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.grid_size < 10 || self.grid_size > 100 {
            return Err("Grid size must be between 10 and 100".to_string());
        }
        if self.base_speed_ms < 50 || self.base_speed_ms > 5000 {
            return Err("Base speed must be between 50ms and 5000ms".to_string());
        }
        if self.min_speed_ms < 1 || self.min_speed_ms > self.base_speed_ms {
            return Err("Min speed must be between 1ms and the base speed".to_string());
        }
        if self.score_per_speed_step == 0 {
            return Err("Score per speed step must be positive".to_string());
        }
        if self.food_score == 0 {
            return Err("Food score must be positive".to_string());
        }
        if self.initial_length < 1 {
            return Err("Initial snake length must be at least 1".to_string());
        }

        let (dx, dy) = self.initial_direction.opposite().delta();
        let trail = self.initial_length as i32 - 1;
        let tail = Point::new(self.initial_head.x + dx * trail, self.initial_head.y + dy * trail);
        let inside = |p: Point| (0..self.grid_size).contains(&p.x) && (0..self.grid_size).contains(&p.y);
        if !inside(self.initial_head) || !inside(tail) {
            return Err("Initial snake must fit inside the grid".to_string());
        }
        Ok(())
    }
}
