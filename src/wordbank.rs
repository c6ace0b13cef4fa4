use crate::error::GameError;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.json");

/// Last-resort word list used when no other source yields any words.
pub const FALLBACK_WORDS: &[&str] = &[
    "MOSES", "JUDAS", "GOLIATH", "EDEN", "NOAH", "JERUSALEM", "ABRAHAM", "ISAAC", "SAMSON",
    "DAVID", "MARY", "PETER", "PAUL", "ADAM", "EVE", "ANGEL", "TEMPLE", "CROSS", "MANGER",
    "SHEPHERD", "EXODUS", "GENESIS", "HEAVEN", "JONAH", "JOB", "REVELATION",
];

/// Letters a player can guess: `A`-`Z` plus the hyphen.
pub fn is_game_letter(c: char) -> bool {
    c.is_ascii_uppercase() || c == '-'
}

/// Trim and uppercase a raw entry, rejecting anything outside the game alphabet.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_uppercase();
    if !word.is_empty() && word.chars().all(is_game_letter) {
        Some(word)
    } else {
        None
    }
}

/// Immutable, de-duplicated list of normalized words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Builds a vocabulary, normalizing entries and dropping invalid words and repeats.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .filter_map(|w| normalize_word(w.as_ref()))
            .filter(|w| seen.insert(w.clone()))
            .collect();
        Self { words }
    }

    pub fn fallback() -> Self {
        Self::from_words(FALLBACK_WORDS)
    }

    /// The word list compiled into the binary, or the fallback list if it cannot be parsed.
    pub fn embedded() -> Self {
        match load_wordbank_from_json(EMBEDDED_WORDBANK) {
            Ok(words) if !words.is_empty() => Self::from_words(words),
            Ok(_) => Self::fallback(),
            Err(e) => {
                log::error!("Embedded word list is unreadable ({e}); using fallback words");
                Self::fallback()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_word).collect()
}

/// Parses a JSON array of strings, e.g. `["MOSES", "judas"]`.
pub fn load_wordbank_from_json(data: &str) -> Result<Vec<String>, GameError> {
    let raw: Vec<String> = serde_json::from_str(data)?;
    Ok(raw.iter().filter_map(|w| normalize_word(w)).collect())
}

/// Reads a word list from disk. `.json` files are parsed as a JSON array,
/// everything else as one word per line.
pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, GameError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let data = fs::read_to_string(path)?;
        return load_wordbank_from_json(&data);
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Loads the vocabulary once at startup.
///
/// A missing, unreadable or empty source degrades to the fallback list so the
/// game stays playable.
pub fn load_vocabulary(path: Option<&Path>) -> Vocabulary {
    let Some(path) = path else {
        return Vocabulary::embedded();
    };

    match load_wordbank_from_file(path) {
        Ok(words) if !words.is_empty() => {
            let vocabulary = Vocabulary::from_words(words);
            log::info!("Loaded {} words from {}", vocabulary.len(), path.display());
            vocabulary
        }
        Ok(_) => {
            log::warn!(
                "No usable words in {}; using fallback words",
                path.display()
            );
            Vocabulary::fallback()
        }
        Err(e) => {
            log::warn!(
                "Failed to load word list from {}: {e}; using fallback words",
                path.display()
            );
            Vocabulary::fallback()
        }
    }
}
