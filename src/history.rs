//! Bounded record of recently played words.
//!
//! Most recent first, no duplicates, never longer than its capacity. The
//! ledger serializes as a plain JSON array of uppercase words.

use crate::config::HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLedger {
    words: Vec<String>,
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    HISTORY_CAPACITY
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl HistoryLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            words: Vec::new(),
            capacity,
        }
    }

    /// Rebuilds a ledger from stored words, restoring the invariants if the
    /// stored data broke them.
    pub fn from_words<I, S>(words: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ledger = Self::new(capacity);
        for word in words {
            let word = word.as_ref().trim().to_uppercase();
            if word.is_empty() || ledger.contains(&word) {
                continue;
            }
            ledger.words.push(word);
        }
        ledger.words.truncate(capacity);
        ledger
    }

    /// Moves `word` to the front, evicting the oldest entry past capacity.
    pub fn record(&mut self, word: &str) {
        let word = word.to_uppercase();
        self.words.retain(|w| *w != word);
        self.words.insert(0, word);
        self.words.truncate(self.capacity);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently played word, if any.
    pub fn latest(&self) -> Option<&str> {
        self.words.first().map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_pushes_to_front() {
        let mut history = HistoryLedger::default();
        history.record("cat");
        history.record("DOG");
        assert_eq!(history.words(), &["DOG".to_string(), "CAT".to_string()]);
        assert_eq!(history.latest(), Some("DOG"));
    }

    #[test]
    fn test_record_existing_word_moves_it() {
        let mut history = HistoryLedger::default();
        history.record("CAT");
        history.record("DOG");
        history.record("CAT");
        assert_eq!(history.words(), &["CAT".to_string(), "DOG".to_string()]);
    }

    #[test]
    fn test_full_history_evicts_oldest() {
        let mut history = HistoryLedger::new(100);
        for i in 0..100 {
            history.record(&format!("WORD{i}"));
        }
        assert_eq!(history.len(), 100);
        history.record("NEWWORD");
        assert_eq!(history.len(), 100);
        assert_eq!(history.latest(), Some("NEWWORD"));
        assert!(!history.contains("WORD0"));
        assert!(history.contains("WORD1"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut history = HistoryLedger::default();
        history.record("EDEN");
        history.record("NOAH");
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"["NOAH","EDEN"]"#);

        let restored: HistoryLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, history);
    }

    #[test]
    fn test_from_words_repairs_invariants() {
        let history = HistoryLedger::from_words(["a", "A", "b", "", "c"], 2);
        assert_eq!(history.words(), &["A".to_string(), "B".to_string()]);
    }

    proptest! {
        #[test]
        fn prop_history_bounded_and_unique(words in prop::collection::vec("[A-E]{1,2}", 0..300)) {
            let mut history = HistoryLedger::new(10);
            for word in &words {
                history.record(word);
                prop_assert!(history.len() <= 10);
                let unique: std::collections::HashSet<_> = history.words().iter().collect();
                prop_assert_eq!(unique.len(), history.len());
                prop_assert_eq!(history.latest(), Some(word.as_str()));
            }
        }
    }
}
