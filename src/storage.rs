//! Client-local key-value persistence for history, score and leaderboard.
//!
//! `FileStore` keeps every key in one JSON object on disk; `MemoryStore` is the
//! throwaway variant used by tests and `--ephemeral` runs.

use crate::error::GameError;
use crate::history::HistoryLedger;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub const HISTORY_KEY: &str = "hangmanWordHistory";
pub const SCORE_KEY: &str = "hangmanScore";
pub const LEADERBOARD_KEY: &str = "hangmanLeaderboard";

const STORE_FILE_NAME: &str = "store.json";
pub const LEADERBOARD_FILE_NAME: &str = "leaderboard.json";
const APP_DIR_NAME: &str = "hangman";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All keys in a single `store.json`, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens (or prepares to create) `store.json` inside `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, GameError> {
        Self::open_named(dir, STORE_FILE_NAME)
    }

    /// Opens a store backed by `dir/file_name`. Two stores must not share a file.
    pub fn open_named<P: AsRef<Path>>(dir: P, file_name: &str) -> Result<Self, GameError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);

        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Ignoring corrupt store at {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        log::debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.entries.insert(key.to_string(), value.to_string());
        let data = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| GameError::Storage(format!("replacing {}: {e}", self.path.display())))
    }
}

/// Platform data directory for the game, e.g. `~/.local/share/hangman`.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Reads the stored history. Missing or corrupt data yields an empty ledger.
pub fn load_history(store: &dyn KeyValueStore, capacity: usize) -> HistoryLedger {
    match store.get(HISTORY_KEY) {
        Ok(Some(json)) => match serde_json::from_str::<Vec<String>>(&json) {
            Ok(words) => HistoryLedger::from_words(words, capacity),
            Err(e) => {
                log::warn!("Stored word history is corrupt ({e}); starting fresh");
                HistoryLedger::new(capacity)
            }
        },
        Ok(None) => HistoryLedger::new(capacity),
        Err(e) => {
            log::warn!("Could not read word history: {e}");
            HistoryLedger::new(capacity)
        }
    }
}

pub fn save_history(
    store: &mut dyn KeyValueStore,
    history: &HistoryLedger,
) -> Result<(), GameError> {
    let json = serde_json::to_string(history)?;
    store.set(HISTORY_KEY, &json)
}

/// Reads the stored score, or `initial` if none is stored or it is unreadable.
pub fn load_score(store: &dyn KeyValueStore, initial: i64) -> i64 {
    match store.get(SCORE_KEY) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("Stored score {raw:?} is not a number ({e}); using {initial}");
            initial
        }),
        Ok(None) => initial,
        Err(e) => {
            log::warn!("Could not read score: {e}");
            initial
        }
    }
}

pub fn save_score(store: &mut dyn KeyValueStore, score: i64) -> Result<(), GameError> {
    store.set(SCORE_KEY, &score.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hangman_store_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = temp_store_dir("persist");
        {
            let mut store = FileStore::open(&dir).unwrap();
            save_score(&mut store, 42).unwrap();
        }
        let store = FileStore::open(&dir).unwrap();
        assert_eq!(load_score(&store, 100), 42);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = temp_store_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(STORE_FILE_NAME), "]]]").unwrap();
        let store = FileStore::open(&dir).unwrap();
        assert_eq!(store.get(SCORE_KEY).unwrap(), None);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_score_uses_initial() {
        let store = MemoryStore::new();
        assert_eq!(load_score(&store, 100), 100);
    }

    #[test]
    fn test_corrupt_score_uses_initial() {
        let mut store = MemoryStore::new();
        store.set(SCORE_KEY, "lots").unwrap();
        assert_eq!(load_score(&store, 100), 100);
    }

    #[test]
    fn test_history_roundtrip_uses_stable_key() {
        let mut store = MemoryStore::new();
        let mut history = HistoryLedger::default();
        history.record("EDEN");
        history.record("NOAH");
        save_history(&mut store, &history).unwrap();
        assert_eq!(
            store.get(HISTORY_KEY).unwrap(),
            Some(r#"["NOAH","EDEN"]"#.to_string())
        );
        assert_eq!(load_history(&store, 100), history);
    }

    #[test]
    fn test_corrupt_history_starts_fresh() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "{oops").unwrap();
        assert!(load_history(&store, 100).is_empty());
    }
}
