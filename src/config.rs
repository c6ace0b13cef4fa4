//! Gameplay constants and runtime options.
//!
//! `GameConfig::default()` reproduces the classic rules: six attempts, a
//! hundred-word history, 100 starting points, +5 per win and 10 per hint.

use std::time::Duration;

pub const DEFAULT_HINT_ENDPOINT: &str = "https://api.datamuse.com/words";
pub const MAX_ATTEMPTS: u32 = 6;
pub const HISTORY_CAPACITY: usize = 100;
pub const INITIAL_SCORE: i64 = 100;
pub const WIN_BONUS: i64 = 5;
pub const HINT_COST: i64 = 10;
pub const MAX_HINT_TERMS: usize = 4;
pub const RESTART_DELAY_SECS: u64 = 5;
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub max_attempts: u32,
    pub history_capacity: usize,
    pub initial_score: i64,
    pub win_bonus: i64,
    pub hint_cost: i64,
    /// Number of related terms requested per hint
    pub max_hint_terms: usize,
    /// Delay between the end of a round and the automatic start of the next
    pub restart_delay: Duration,
    pub hint_endpoint: String,
    pub leaderboard_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            history_capacity: HISTORY_CAPACITY,
            initial_score: INITIAL_SCORE,
            win_bonus: WIN_BONUS,
            hint_cost: HINT_COST,
            max_hint_terms: MAX_HINT_TERMS,
            restart_delay: Duration::from_secs(RESTART_DELAY_SECS),
            hint_endpoint: DEFAULT_HINT_ENDPOINT.to_string(),
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }
}
