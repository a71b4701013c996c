use serde::Serialize;

use crate::api::ApiResponse;
use crate::games::SessionRng;
use crate::id_generator::generate_id;
use crate::{log, PlayerId};
use super::settings::SnakeSettings;
use super::entity::SnakeEntity;
use super::tick_engine;
use super::types::{Direction, GameMode, GameStatus, Point, TickOutcome};

pub const DEFAULT_TURN_PROBABILITY: f64 = 0.1;

/// One simulated player as shown in the watch feed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActivePlayer {
    pub id: PlayerId,
    pub username: String,
    pub score: u32,
    pub mode: GameMode,
    pub snake: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub status: GameStatus,
}

#[derive(Clone, Debug)]
pub struct PoolPlayer {
    pub id: PlayerId,
    pub username: String,
    pub entity: SnakeEntity,
}

impl PoolPlayer {
    pub fn to_active_player(&self) -> ActivePlayer {
        ActivePlayer {
            id: self.id.clone(),
            username: self.username.clone(),
            score: self.entity.score,
            mode: self.entity.mode,
            snake: self.entity.body.iter().copied().collect(),
            food: self.entity.food,
            direction: self.entity.direction,
            status: self.entity.status,
        }
    }
}

/// Simulated "players online". Every entity wanders with random turns and is
/// respawned in place when it dies, so the feed never shows a finished game.
pub struct SimulationPool {
    players: Vec<PoolPlayer>,
    settings: SnakeSettings,
    turn_probability: f64,
    tick_count: u64,
}

impl SimulationPool {
    pub fn new(settings: SnakeSettings, turn_probability: f64) -> Self {
        Self {
            players: Vec::new(),
            settings,
            turn_probability: turn_probability.clamp(0.0, 1.0),
            tick_count: 0,
        }
    }

    pub fn with_sample_players(settings: SnakeSettings, turn_probability: f64, rng: &mut SessionRng) -> Self {
        let mut pool = Self::new(settings, turn_probability);
        pool.add_player_with_id(
            PlayerId::from("player1"),
            "LiveGamer42",
            GameMode::Walls,
            Point::new(10, 10),
            Direction::Right,
            320,
            Some(Point::new(15, 8)),
            rng,
        );
        pool.add_player_with_id(
            PlayerId::from("player2"),
            "StreamSnake",
            GameMode::PassThrough,
            Point::new(8, 12),
            Direction::Up,
            180,
            Some(Point::new(12, 5)),
            rng,
        );
        pool.add_player_with_id(
            PlayerId::from("player3"),
            "ProSlither",
            GameMode::Walls,
            Point::new(5, 8),
            Direction::Down,
            540,
            Some(Point::new(18, 15)),
            rng,
        );
        pool
    }

    pub fn add_player(
        &mut self,
        username: &str,
        mode: GameMode,
        head: Point,
        direction: Direction,
        score: u32,
        food: Option<Point>,
        rng: &mut SessionRng,
    ) -> PlayerId {
        self.add_player_with_id(PlayerId::new(generate_id()), username, mode, head, direction, score, food, rng)
    }

    fn add_player_with_id(
        &mut self,
        id: PlayerId,
        username: &str,
        mode: GameMode,
        head: Point,
        direction: Direction,
        score: u32,
        food: Option<Point>,
        rng: &mut SessionRng,
    ) -> PlayerId {
        let entity = SnakeEntity::spawned_at(self.settings, mode, head, direction, score, food, rng);
        self.players.push(PoolPlayer {
            id: id.clone(),
            username: username.to_string(),
            entity,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn players(&self) -> &[PoolPlayer] {
        &self.players
    }

    pub fn active_players(&self) -> Vec<ActivePlayer> {
        self.players.iter().map(PoolPlayer::to_active_player).collect()
    }

    pub fn player(&self, player_id: &PlayerId) -> ApiResponse<ActivePlayer> {
        match self.players.iter().find(|p| &p.id == player_id) {
            Some(player) => ApiResponse::ok(player.to_active_player()),
            None => ApiResponse::err("Player not found"),
        }
    }

    /// Advances every player once. Returns each player's outcome, reported
    /// before any respawn.
    pub fn tick(&mut self, rng: &mut SessionRng) -> Vec<(PlayerId, TickOutcome)> {
        self.tick_count += 1;
        let turn_probability = self.turn_probability;

        self.players
            .iter_mut()
            .map(|player| {
                let entity = &mut player.entity;
                if rng.chance(turn_probability)
                    && let Some(turn) = rng.choose(&entity.direction.perpendicular())
                {
                    entity.pending_direction = turn;
                }

                let outcome = tick_engine::tick(entity, rng);
                if outcome == TickOutcome::AteFood {
                    let head = entity.head();
                    log!("[{}] ate food at ({}, {}), score {}", player.id, head.x, head.y, entity.score);
                } else if outcome.is_terminal() {
                    log!(
                        "[{}] {} died ({:?}) with score {}, respawning",
                        player.id,
                        player.username,
                        outcome,
                        entity.score
                    );
                    entity.start(rng);
                }
                (player.id.clone(), outcome)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn create_pool(turn_probability: f64) -> (SimulationPool, SessionRng) {
        let mut rng = SessionRng::new(42);
        let pool = SimulationPool::with_sample_players(SnakeSettings::default(), turn_probability, &mut rng);
        (pool, rng)
    }

    #[test]
    fn test_sample_players_are_playing() {
        let (pool, _) = create_pool(DEFAULT_TURN_PROBABILITY);
        assert_eq!(pool.len(), 3);
        let players = pool.active_players();
        assert_eq!(players[0].username, "LiveGamer42");
        assert_eq!(players[1].mode, GameMode::PassThrough);
        assert_eq!(players[2].score, 540);
        assert!(players.iter().all(|p| p.status == GameStatus::Playing));
        assert!(players.iter().all(|p| p.snake.len() == 3));
    }

    #[test]
    fn test_player_lookup() {
        let (pool, _) = create_pool(DEFAULT_TURN_PROBABILITY);
        let found = pool.player(&PlayerId::from("player2"));
        assert!(found.success);
        assert_eq!(found.data.unwrap().username, "StreamSnake");

        let missing = pool.player(&PlayerId::from("nobody"));
        assert!(!missing.success);
        assert_eq!(missing.error.as_deref(), Some("Player not found"));
    }

    #[test]
    fn test_no_turns_moves_straight() {
        let (mut pool, mut rng) = create_pool(0.0);
        pool.tick(&mut rng);
        let players = pool.active_players();
        assert_eq!(players[0].snake[0], Point::new(11, 10));
        assert_eq!(players[1].snake[0], Point::new(8, 11));
        assert_eq!(players[2].snake[0], Point::new(5, 9));
        assert_eq!(pool.tick_count(), 1);
    }

    #[test]
    fn test_turns_are_perpendicular() {
        let (mut pool, mut rng) = create_pool(1.0);
        for _ in 0..50 {
            let before: Vec<Direction> = pool.players().iter().map(|p| p.entity.direction).collect();
            let outcomes = pool.tick(&mut rng);
            for ((player, previous), (_, outcome)) in pool.players().iter().zip(before).zip(outcomes) {
                if !outcome.is_terminal() {
                    assert!(previous.perpendicular().contains(&player.entity.direction));
                }
            }
        }
    }

    #[test]
    fn test_wall_death_respawns() {
        let (mut pool, mut rng) = create_pool(0.0);
        {
            let entity = &mut pool.players[0].entity;
            entity.body = VecDeque::from(vec![Point::new(19, 3), Point::new(18, 3), Point::new(17, 3)]);
            entity.direction = Direction::Right;
            entity.pending_direction = Direction::Right;
        }

        let outcomes = pool.tick(&mut rng);
        assert_eq!(outcomes[0].1, TickOutcome::WallCollision);

        let player = &pool.players()[0];
        assert_eq!(player.entity.status, GameStatus::Playing);
        assert_eq!(player.entity.score, 0);
        assert_eq!(player.entity.head(), Point::new(10, 10));
        assert_eq!(player.entity.mode, GameMode::Walls);
    }

    #[test]
    fn test_pool_player_eats_food_keeps_score() {
        let (mut pool, mut rng) = create_pool(0.0);
        pool.players[0].entity.food = Point::new(11, 10);

        let outcomes = pool.tick(&mut rng);
        assert_eq!(outcomes[0], (PlayerId::from("player1"), TickOutcome::AteFood));

        let player = pool.player(&PlayerId::from("player1")).into_result().unwrap();
        assert_eq!(player.score, 330);
        assert_eq!(player.snake.len(), 4);
        assert_eq!(player.snake[0], Point::new(11, 10));
        assert_eq!(player.status, GameStatus::Playing);
        assert!(!player.snake.contains(&player.food));
    }

    #[test]
    fn test_self_collision_respawns() {
        let (mut pool, mut rng) = create_pool(0.0);
        {
            let entity = &mut pool.players[2].entity;
            entity.body = VecDeque::from(vec![
                Point::new(5, 5),
                Point::new(6, 5),
                Point::new(6, 6),
                Point::new(5, 6),
                Point::new(4, 6),
            ]);
            entity.direction = Direction::Down;
            entity.pending_direction = Direction::Down;
            entity.food = Point::new(0, 0);
        }

        let outcomes = pool.tick(&mut rng);
        assert_eq!(outcomes[2].1, TickOutcome::SelfCollision);

        let player = &pool.players()[2];
        assert_eq!(player.entity.status, GameStatus::Playing);
        assert_eq!(player.entity.score, 0);
        assert_eq!(player.entity.len(), 3);
        assert_eq!(player.entity.head(), Point::new(10, 10));
        assert_eq!(player.entity.mode, GameMode::Walls);
    }

    #[test]
    fn test_every_player_stays_playing() {
        let (mut pool, mut rng) = create_pool(0.5);
        for _ in 0..3000 {
            pool.tick(&mut rng);
            assert!(pool.players().iter().all(|p| p.entity.status == GameStatus::Playing));
            assert!(pool.players().iter().all(|p| !p.entity.body.contains(&p.entity.food)));
        }
    }

    #[test]
    fn test_players_are_independent() {
        let (mut pool, mut rng) = create_pool(0.0);
        let id = pool.add_player("Solo", GameMode::PassThrough, Point::new(3, 3), Direction::Left, 0, None, &mut rng);
        assert_eq!(pool.len(), 4);
        pool.tick(&mut rng);
        let solo = pool.player(&id).into_result().unwrap();
        assert_eq!(solo.snake[0], Point::new(2, 3));
        assert_eq!(pool.active_players()[0].snake[0], Point::new(11, 10));
    }
}
