use std::collections::VecDeque;

use serde::Serialize;

use crate::games::SessionRng;
use super::geometry;
use super::settings::SnakeSettings;
use super::types::{Direction, GameMode, GameStatus, Point};

/// Read-only view handed to renderers once per frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub body: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub grid_size: i32,
}

#[derive(Clone, Debug)]
pub struct SnakeEntity {
    /// Head first. Never empty.
    pub body: VecDeque<Point>,
    pub food: Point,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub mode: GameMode,
    /// Tick interval in milliseconds.
    pub speed: u64,
    pub settings: SnakeSettings,
}

pub fn initial_body(head: Point, direction: Direction, length: usize) -> VecDeque<Point> {
    let (dx, dy) = direction.opposite().delta();
    (0..length.max(1) as i32)
        .map(|i| Point::new(head.x + dx * i, head.y + dy * i))
        .collect()
}

impl SnakeEntity {
    /// Canonical snake in `Idle`, food already placed.
    pub fn new(settings: SnakeSettings, mode: GameMode, rng: &mut SessionRng) -> Self {
        let body = initial_body(settings.initial_head, settings.initial_direction, settings.initial_length);
        let mut entity = Self {
            food: settings.initial_head,
            body,
            direction: settings.initial_direction,
            pending_direction: settings.initial_direction,
            score: 0,
            status: GameStatus::Idle,
            mode,
            speed: settings.base_speed_ms,
            settings,
        };
        entity.place_food(rng);
        entity
    }

    /// Snake placed at an arbitrary spot, already `Playing`. Used by the watch
    /// feed to seed players mid-game.
    pub fn spawned_at(
        settings: SnakeSettings,
        mode: GameMode,
        head: Point,
        direction: Direction,
        score: u32,
        food: Option<Point>,
        rng: &mut SessionRng,
    ) -> Self {
        let body = initial_body(head, direction, settings.initial_length);
        let mut entity = Self {
            food: head,
            body,
            direction,
            pending_direction: direction,
            score,
            status: GameStatus::Playing,
            mode,
            speed: settings.speed_for_score(score),
            settings,
        };
        match food {
            Some(food)
                if !geometry::is_out_of_bounds(food, settings.grid_size)
                    && !geometry::collides_with_body(food, &entity.body) =>
            {
                entity.food = food
            }
            _ => entity.place_food(rng),
        }
        entity
    }

    pub fn head(&self) -> Point {
        self.body.front().copied().unwrap_or(self.settings.initial_head)
    }

    pub fn tail(&self) -> Point {
        self.body.back().copied().unwrap_or(self.settings.initial_head)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            body: self.body.iter().copied().collect(),
            food: self.food,
            direction: self.direction,
            grid_size: self.settings.grid_size,
        }
    }

    pub fn place_food(&mut self, rng: &mut SessionRng) {
        if let Some(food) = geometry::spawn_food(&self.body, self.settings.grid_size, rng) {
            self.food = food;
        }
    }

    /// Buffers a turn for the next tick. Reversals and input outside of play
    /// are dropped.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.status != GameStatus::Playing {
            return;
        }
        if direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = direction;
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    pub fn start(&mut self, rng: &mut SessionRng) {
        self.restore(GameStatus::Playing, rng);
    }

    pub fn reset(&mut self, rng: &mut SessionRng) {
        self.restore(GameStatus::Idle, rng);
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
        }
    }

    fn restore(&mut self, status: GameStatus, rng: &mut SessionRng) {
        let settings = self.settings;
        self.body = initial_body(settings.initial_head, settings.initial_direction, settings.initial_length);
        self.direction = settings.initial_direction;
        self.pending_direction = settings.initial_direction;
        self.score = 0;
        self.speed = settings.base_speed_ms;
        self.status = status;
        self.place_food(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_entity() -> (SnakeEntity, SessionRng) {
        let mut rng = SessionRng::new(42);
        let entity = SnakeEntity::new(SnakeSettings::default(), GameMode::Walls, &mut rng);
        (entity, rng)
    }

    #[test]
    fn test_initial_body_trails_behind_head() {
        let body = initial_body(Point::new(10, 10), Direction::Right, 3);
        assert_eq!(
            body,
            VecDeque::from(vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)])
        );
        let body = initial_body(Point::new(8, 12), Direction::Up, 3);
        assert_eq!(body.back(), Some(&Point::new(8, 14)));
    }

    #[test]
    fn test_new_is_idle_with_food_outside_body() {
        let (entity, _) = create_entity();
        assert_eq!(entity.status, GameStatus::Idle);
        assert_eq!(entity.len(), 3);
        assert_eq!(entity.head(), Point::new(10, 10));
        assert!(!entity.body.contains(&entity.food));
    }

    #[test]
    fn test_start_resets_everything() {
        let (mut entity, mut rng) = create_entity();
        entity.score = 100;
        entity.speed = 90;
        entity.direction = Direction::Up;
        entity.pending_direction = Direction::Left;
        entity.body.push_front(Point::new(10, 9));
        entity.start(&mut rng);

        assert_eq!(entity.status, GameStatus::Playing);
        assert_eq!(entity.score, 0);
        assert_eq!(entity.len(), 3);
        assert_eq!(entity.head(), Point::new(10, 10));
        assert_eq!(entity.direction, Direction::Right);
        assert_eq!(entity.pending_direction, Direction::Right);
        assert_eq!(entity.speed, 150);
        assert!(!entity.body.contains(&entity.food));
    }

    #[test]
    fn test_reset_goes_idle() {
        let (mut entity, mut rng) = create_entity();
        entity.start(&mut rng);
        entity.score = 100;
        entity.reset(&mut rng);
        assert_eq!(entity.status, GameStatus::Idle);
        assert_eq!(entity.score, 0);
        assert_eq!(entity.direction, Direction::Right);
    }

    #[test]
    fn test_set_direction_while_playing() {
        let (mut entity, mut rng) = create_entity();
        entity.start(&mut rng);
        entity.set_direction(Direction::Up);
        assert_eq!(entity.pending_direction, Direction::Up);
        assert_eq!(entity.direction, Direction::Right);
    }

    #[test]
    fn test_set_direction_rejects_reversal() {
        let (mut entity, mut rng) = create_entity();
        entity.start(&mut rng);
        entity.set_direction(Direction::Left);
        assert_eq!(entity.pending_direction, Direction::Right);
    }

    #[test]
    fn test_reversal_checked_against_committed_direction() {
        let (mut entity, mut rng) = create_entity();
        entity.start(&mut rng);
        entity.set_direction(Direction::Up);
        // Still moving right until the next tick, so LEFT is a reversal.
        entity.set_direction(Direction::Left);
        assert_eq!(entity.pending_direction, Direction::Up);
    }

    #[test]
    fn test_set_direction_ignored_when_not_playing() {
        let (mut entity, mut rng) = create_entity();
        entity.set_direction(Direction::Up);
        assert_eq!(entity.pending_direction, Direction::Right);

        entity.start(&mut rng);
        entity.pause();
        entity.set_direction(Direction::Down);
        assert_eq!(entity.pending_direction, Direction::Right);
    }

    #[test]
    fn test_pause_resume_are_idempotent() {
        let (mut entity, mut rng) = create_entity();
        entity.pause();
        assert_eq!(entity.status, GameStatus::Idle);

        entity.start(&mut rng);
        entity.resume();
        assert_eq!(entity.status, GameStatus::Playing);
        entity.pause();
        entity.pause();
        assert_eq!(entity.status, GameStatus::Paused);
        entity.resume();
        entity.resume();
        assert_eq!(entity.status, GameStatus::Playing);
    }

    #[test]
    fn test_set_mode_applies_in_any_status() {
        let (mut entity, mut rng) = create_entity();
        entity.start(&mut rng);
        entity.set_mode(GameMode::PassThrough);
        assert_eq!(entity.mode, GameMode::PassThrough);
    }

    #[test]
    fn test_spawned_at_keeps_valid_food() {
        let mut rng = SessionRng::new(42);
        let entity = SnakeEntity::spawned_at(
            SnakeSettings::default(),
            GameMode::PassThrough,
            Point::new(8, 12),
            Direction::Up,
            180,
            Some(Point::new(12, 5)),
            &mut rng,
        );
        assert_eq!(entity.status, GameStatus::Playing);
        assert_eq!(entity.food, Point::new(12, 5));
        assert_eq!(entity.score, 180);
        assert_eq!(entity.speed, 120);
    }

    #[test]
    fn test_spawned_at_replaces_food_on_body() {
        let mut rng = SessionRng::new(42);
        let entity = SnakeEntity::spawned_at(
            SnakeSettings::default(),
            GameMode::Walls,
            Point::new(10, 10),
            Direction::Right,
            0,
            Some(Point::new(9, 10)),
            &mut rng,
        );
        assert!(!entity.body.contains(&entity.food));
    }

    #[test]
    fn test_snapshot_mirrors_entity() {
        let (entity, _) = create_entity();
        let snapshot = entity.snapshot();
        assert_eq!(snapshot.body.len(), 3);
        assert_eq!(snapshot.food, entity.food);
        assert_eq!(snapshot.grid_size, 20);
        assert_eq!(snapshot.direction, Direction::Right);
    }
}
