use std::fmt;
use std::io;

/// Errors surfaced by the game core.
///
/// Hint lookups never produce one of these; the gateway maps its own failures
/// to display text.
#[derive(Debug)]
pub enum GameError {
    /// The vocabulary has no words, so no round can start.
    EmptyVocabulary,
    /// A guess that is not a letter of the game alphabet.
    InvalidLetter(char),
    /// A round command arrived while no round exists.
    NoActiveRound,
    Storage(String),
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVocabulary => write!(f, "the vocabulary is empty; cannot start a round"),
            Self::InvalidLetter(c) => write!(f, "'{c}' is not a valid letter"),
            Self::NoActiveRound => write!(f, "no round is in progress"),
            Self::Storage(msg) => write!(f, "storage error: {msg}"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Serialization(e) => write!(f, "serialization error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
