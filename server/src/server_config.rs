use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "snake_arcade.yaml";
pub const STATUS_REPORT_INTERVAL: Duration = Duration::from_secs(10);
pub const DEMO_PLAYER_NAME: &str = "AutoPilot";
pub const LEADERBOARD_REPORT_SIZE: usize = 5;
