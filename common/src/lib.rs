pub mod accounts;
pub mod api;
pub mod config;
pub mod games;
pub mod high_score;
pub mod id_generator;
pub mod identifiers;
pub mod leaderboard;
pub mod logger;

pub use identifiers::*;
