use crate::config::{DEFAULT_HINT_ENDPOINT, GameConfig, RESTART_DELAY_SECS};
use crate::error::GameError;
use crate::game_state::{
    GameInterface, GuessReport, HintPurchase, RoundSummary, RoundView, UserAction,
};
use crate::leaderboard::LeaderboardView;
use crate::round::GuessOutcome;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

/// Hangman with word history, hints and a local leaderboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a word list (JSON array, or one word per line)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Directory for saved score, history and leaderboard
    #[arg(long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Never contact the hint service
    #[arg(long)]
    pub offline: bool,

    /// Keep all state in memory; nothing is read from or written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Base URL of the related-words service
    #[arg(long = "hint-endpoint", default_value = DEFAULT_HINT_ENDPOINT)]
    pub hint_endpoint: String,

    /// Seconds before a new round starts after one ends
    #[arg(long = "restart-delay", default_value_t = RESTART_DELAY_SECS)]
    pub restart_delay: u64,

    /// Name to submit leaderboard scores under
    #[arg(long)]
    pub player: Option<String>,

    /// Seed for word selection, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            restart_delay: Duration::from_secs(self.restart_delay),
            hint_endpoint: self.hint_endpoint.clone(),
            ..GameConfig::default()
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

#[derive(Debug, PartialEq, Eq)]
pub enum CommandInput {
    Action(UserAction),
    Invalid,
}

/// Parses one line of player input.
pub fn parse_command(input: &str) -> CommandInput {
    let input = input.trim().to_uppercase();
    match input.as_str() {
        "EXIT" | "QUIT" => CommandInput::Action(UserAction::Exit),
        "HINT" | "?" => CommandInput::Action(UserAction::Hint),
        "NEW" | "NEXT" => CommandInput::Action(UserAction::NewRound),
        "SCORES" | "LEADERBOARD" => CommandInput::Action(UserAction::ShowLeaderboard),
        _ => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => CommandInput::Action(UserAction::Guess(c)),
                _ => CommandInput::Invalid,
            }
        }
    }
}

pub fn read_command<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    println!("\nGuess a letter (or 'hint', 'new', 'scores', 'exit'):");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => return Some(UserAction::Exit),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to read input: {e}");
            return Some(UserAction::Exit);
        }
    }

    match parse_command(&input) {
        CommandInput::Action(action) => Some(action),
        CommandInput::Invalid => {
            println!("Invalid input. Enter a single letter or a command.");
            None
        }
    }
}

pub fn display_round(view: &RoundView) {
    println!("\nNew round: {} letters.", view.word_len);
    display_status(view);
}

fn display_status(view: &RoundView) {
    println!("Word: {}", view.display_word);
    println!(
        "Guesses left: {}/{}   Score: {}",
        view.attempts_remaining, view.max_attempts, view.score
    );
    println!("{}", view.hint_label());
    if !view.guessed.is_empty() {
        let guessed: String = view.guessed.iter().collect();
        println!("Guessed: {guessed}");
    }
}

pub fn display_guess(report: &GuessReport, view: &RoundView) {
    match &report.outcome {
        GuessOutcome::AlreadyGuessed => println!("You already tried '{}'.", report.letter),
        GuessOutcome::RoundOver => {
            println!("This round is over. Type 'new' to start the next one.");
            return;
        }
        GuessOutcome::Hit { positions } => {
            println!("'{}' is in the word ({}x)!", report.letter, positions.len());
        }
        GuessOutcome::Miss { .. } | GuessOutcome::Lost => {
            println!("No '{}' in the word.", report.letter);
        }
        GuessOutcome::Won => {}
    }
    display_status(view);
}

pub fn display_hint(purchase: &HintPurchase) {
    match purchase {
        HintPurchase::Delivered { text, score } => {
            println!("Hint: {text}");
            println!("Score: {score}");
        }
        HintPurchase::Refused { cost, balance } => {
            println!("Not enough points for a hint ({cost} required, you have {balance}).");
        }
        HintPurchase::AlreadyUsed => println!("Hint already used this round."),
    }
}

pub fn display_round_over(summary: &RoundSummary, restart_in: Duration) {
    if summary.won {
        println!(
            "You won! The word was {}. +{} points (score {}).",
            summary.word, summary.bonus, summary.score
        );
    } else {
        println!("Game over! The word was: {}", summary.word);
    }
    if summary.new_personal_best {
        println!("NEW PERSONAL BEST!");
    }
    println!(
        "Next round starts in {}s, or type 'new'.",
        restart_in.as_secs()
    );
}

pub fn display_leaderboard(view: Option<&LeaderboardView>) {
    let Some(view) = view else {
        println!("No leaderboard configured. Start with --player <NAME> to keep scores.");
        return;
    };

    println!("Leaderboard:");
    if view.top.is_empty() {
        println!("  No scores yet. Be the first!");
    }
    for (i, entry) in view.top.iter().enumerate() {
        println!("  #{} {}: {}", i + 1, entry.username, entry.score);
    }
    match view.personal_best {
        Some(best) => println!("Your best: {best} pts"),
        None => println!("Your best: no scores yet"),
    }
}

pub fn display_error(error: &GameError) {
    println!("Error: {error}");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_round(&mut self, view: &RoundView) {
        display_round(view);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_command(&mut self.reader)
    }

    fn display_guess(&mut self, report: &GuessReport, view: &RoundView) {
        display_guess(report, view);
    }

    fn display_hint(&mut self, purchase: &HintPurchase) {
        display_hint(purchase);
    }

    fn display_round_over(&mut self, summary: &RoundSummary, restart_in: Duration) {
        display_round_over(summary, restart_in);
    }

    fn display_leaderboard(&mut self, view: Option<&LeaderboardView>) {
        display_leaderboard(view);
    }

    fn display_error(&mut self, error: &GameError) {
        display_error(error);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
