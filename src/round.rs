//! One round of Hangman: a target word, the letters guessed so far and the
//! attempts left.
//!
//! States: `InProgress` → `Won` | `Lost`. Both terminal states are final; any
//! further guess is answered with `GuessOutcome::RoundOver` and changes nothing.

use crate::error::GameError;
use crate::wordbank::is_game_letter;

pub const PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter was guessed earlier in this round
    AlreadyGuessed,
    /// The round had already ended
    RoundOver,
    Hit { positions: Vec<usize> },
    Miss { attempts_remaining: u32 },
    Won,
    Lost,
}

impl GuessOutcome {
    /// True for the guess that ended the round.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Debug, Clone)]
pub struct Round {
    word: String,
    target: Vec<char>,
    revealed: Vec<char>,
    guessed: Vec<char>,
    max_attempts: u32,
    attempts_remaining: u32,
    status: RoundStatus,
}

impl Round {
    pub fn new(word: &str, max_attempts: u32) -> Self {
        let word = word.trim().to_uppercase();
        let target: Vec<char> = word.chars().collect();
        let revealed = vec![PLACEHOLDER; target.len()];
        Self {
            word,
            target,
            revealed,
            guessed: Vec::new(),
            max_attempts,
            attempts_remaining: max_attempts,
            status: RoundStatus::InProgress,
        }
    }

    /// Evaluates one letter.
    ///
    /// Repeats and guesses after the round ended leave the state untouched.
    pub fn guess(&mut self, letter: char) -> Result<GuessOutcome, GameError> {
        let letter = letter.to_ascii_uppercase();
        if !is_game_letter(letter) {
            return Err(GameError::InvalidLetter(letter));
        }
        if self.status != RoundStatus::InProgress {
            return Ok(GuessOutcome::RoundOver);
        }
        if self.has_guessed(letter) {
            return Ok(GuessOutcome::AlreadyGuessed);
        }

        self.guessed.push(letter);

        let positions: Vec<usize> = self
            .target
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == letter)
            .map(|(i, _)| i)
            .collect();

        if positions.is_empty() {
            self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            if self.attempts_remaining == 0 {
                self.status = RoundStatus::Lost;
                return Ok(GuessOutcome::Lost);
            }
            return Ok(GuessOutcome::Miss {
                attempts_remaining: self.attempts_remaining,
            });
        }

        for &i in &positions {
            self.revealed[i] = letter;
        }
        if !self.revealed.contains(&PLACEHOLDER) {
            self.status = RoundStatus::Won;
            return Ok(GuessOutcome::Won);
        }
        Ok(GuessOutcome::Hit { positions })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn revealed(&self) -> &[char] {
        &self.revealed
    }

    /// Revealed word without separators, e.g. `DO_`.
    pub fn revealed_string(&self) -> String {
        self.revealed.iter().collect()
    }

    /// Revealed word spaced out for display, e.g. `D O _`.
    pub fn display_word(&self) -> String {
        self.revealed
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Letters in the order they were guessed.
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter.to_ascii_uppercase())
    }

    /// Guessed letters that are not in the word.
    pub fn wrong_letters(&self) -> Vec<char> {
        self.guessed
            .iter()
            .copied()
            .filter(|c| !self.target.contains(c))
            .collect()
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != RoundStatus::InProgress
    }
}
