mod entity;
mod geometry;
mod pool;
mod runner;
mod session;
mod settings;
mod tick_engine;
mod types;

pub use geometry::{advance, apply_mode, collides_with_body, is_out_of_bounds, spawn_food};
pub use pool::{ActivePlayer, PoolPlayer, SimulationPool, DEFAULT_TURN_PROBABILITY};
pub use runner::{PlayerSubscription, PoolRunner, SessionRunner, SharedPool, SharedSession};
pub use session::GameSession;
pub use settings::SnakeSettings;
pub use entity::{initial_body, RenderSnapshot, SnakeEntity};
pub use tick_engine::tick;
pub use types::{Direction, GameMode, GameStatus, Point, TickOutcome};
