use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::ApiResponse;
use crate::games::snake::GameMode;
use crate::id_generator::generate_id;
use crate::{log, EntryId};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub id: EntryId,
    pub username: String,
    pub score: u32,
    pub mode: GameMode,
    pub created_at: DateTime<Utc>,
}

/// Append-only score table. Scores are taken at face value.
#[derive(Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_entries() -> Self {
        const SAMPLE: &[(&str, u32, GameMode, &str)] = &[
            ("NeonViper", 2450, GameMode::Walls, "2024-12-01T08:00:00Z"),
            ("PixelSnake", 2100, GameMode::PassThrough, "2024-12-02T12:30:00Z"),
            ("ArcadeKing", 1890, GameMode::Walls, "2024-12-03T15:45:00Z"),
            ("RetroGamer", 1750, GameMode::PassThrough, "2024-12-04T09:20:00Z"),
            ("SnakeMaster", 1620, GameMode::Walls, "2024-12-05T18:10:00Z"),
            ("GameWizard", 1500, GameMode::PassThrough, "2024-12-06T11:00:00Z"),
            ("NightCrawler", 1350, GameMode::Walls, "2024-12-06T14:30:00Z"),
            ("ByteRunner", 1200, GameMode::PassThrough, "2024-12-07T16:45:00Z"),
            ("GlitchHunter", 1050, GameMode::Walls, "2024-12-07T19:00:00Z"),
            ("CyberSerpent", 900, GameMode::PassThrough, "2024-12-07T21:15:00Z"),
        ];

        let entries = SAMPLE
            .iter()
            .enumerate()
            .map(|(i, &(username, score, mode, created_at))| LeaderboardEntry {
                id: EntryId::new((i + 1).to_string()),
                username: username.to_string(),
                score,
                mode,
                created_at: DateTime::parse_from_rfc3339(created_at)
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or_default(),
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score first; equal scores keep submission order.
    pub fn list(&self, mode: Option<GameMode>) -> ApiResponse<Vec<LeaderboardEntry>> {
        let mut entries: Vec<LeaderboardEntry> = self
            .entries
            .iter()
            .filter(|e| mode.is_none_or(|m| e.mode == m))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        ApiResponse::ok(entries)
    }

    pub fn submit(&mut self, username: &str, score: u32, mode: GameMode) -> ApiResponse<LeaderboardEntry> {
        let entry = LeaderboardEntry {
            id: EntryId::new(generate_id()),
            username: username.to_string(),
            score,
            mode,
            created_at: Utc::now(),
        };
        self.entries.push(entry.clone());
        log!("Score submitted: {} scored {} in {:?}", entry.username, entry.score, entry.mode);
        ApiResponse::ok(entry)
    }
}
