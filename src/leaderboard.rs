//! Leaderboard persistence
//!
//! The game only needs three calls from a leaderboard backend: submit a score,
//! read the top entries, read one player's best. `LocalLeaderboard` provides
//! them on top of any `KeyValueStore`.

use crate::error::GameError;
use crate::storage::{KeyValueStore, LEADERBOARD_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The player scores are submitted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub user_id: String,
    pub username: String,
}

impl Player {
    /// Player identified by display name; the id is the lowercased, trimmed name.
    pub fn named(username: &str) -> Self {
        let username = username.trim().to_string();
        Self {
            user_id: username.to_lowercase(),
            username,
        }
    }
}

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub score: i64,
    pub submitted_at: DateTime<Utc>,
}

pub trait Leaderboard {
    /// Upserts the player's row, keeping the higher of the stored and new score.
    fn submit_score(&mut self, player: &Player, score: i64) -> Result<(), GameError>;

    /// Highest scores first, at most `limit` rows.
    fn fetch_top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, GameError>;

    fn fetch_personal_best(&self, user_id: &str) -> Result<Option<i64>, GameError>;
}

pub struct LocalLeaderboard<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LocalLeaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<LeaderboardEntry>, GameError> {
        match self.store.get(LEADERBOARD_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<(), GameError> {
        let json = serde_json::to_string(entries)?;
        self.store.set(LEADERBOARD_KEY, &json)
    }
}

impl<S: KeyValueStore> Leaderboard for LocalLeaderboard<S> {
    fn submit_score(&mut self, player: &Player, score: i64) -> Result<(), GameError> {
        let mut entries = self.load()?;
        let now = Utc::now();

        match entries.iter_mut().find(|e| e.user_id == player.user_id) {
            Some(entry) => {
                entry.username.clone_from(&player.username);
                if score > entry.score {
                    entry.score = score;
                    entry.submitted_at = now;
                }
            }
            None => entries.push(LeaderboardEntry {
                user_id: player.user_id.clone(),
                username: player.username.clone(),
                score,
                submitted_at: now,
            }),
        }

        log::info!("Submitted score {score} for {}", player.username);
        self.save(&entries)
    }

    fn fetch_top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, GameError> {
        let mut entries = self.load()?;
        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.submitted_at.cmp(&b.submitted_at))
        });
        entries.truncate(limit);
        Ok(entries)
    }

    fn fetch_personal_best(&self, user_id: &str) -> Result<Option<i64>, GameError> {
        Ok(self
            .load()?
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.score)
            .max())
    }
}

/// Snapshot shown to the player: the top rows and, if known, their own best.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardView {
    pub top: Vec<LeaderboardEntry>,
    pub personal_best: Option<i64>,
}
