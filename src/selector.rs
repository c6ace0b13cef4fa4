use crate::error::GameError;
use crate::history::HistoryLedger;
use crate::wordbank::Vocabulary;
use rand::Rng;

/// Result of a word draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub word: String,
    /// True when every draw hit the history and the history was wiped to
    /// allow a repeat.
    pub history_cleared: bool,
}

/// Picks a word that is not in `history`.
///
/// Draws uniformly with replacement, giving up after `2 * |vocabulary|`
/// draws. On give-up the history is cleared and the last draw is used anyway.
/// The chosen word is not recorded in the history.
pub fn select_word<R: Rng + ?Sized>(
    vocabulary: &Vocabulary,
    history: &mut HistoryLedger,
    rng: &mut R,
) -> Result<Selection, GameError> {
    if vocabulary.is_empty() {
        return Err(GameError::EmptyVocabulary);
    }

    let max_attempts = vocabulary.len() * 2;
    let mut attempts = 0;
    loop {
        let word = &vocabulary.words()[rng.random_range(0..vocabulary.len())];
        attempts += 1;

        if !history.contains(word) {
            return Ok(Selection {
                word: word.clone(),
                history_cleared: false,
            });
        }

        if attempts >= max_attempts {
            log::warn!(
                "No unplayed word found after {attempts} draws; clearing history of {} words",
                history.len()
            );
            history.clear();
            return Ok(Selection {
                word: word.clone(),
                history_cleared: true,
            });
        }
    }
}
