//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the gallows, the word, the keyboard and messages,
//!   and turns key presses into `UserAction`s for the game loop.
//!
//! # Input
//! Letter keys guess, TAB buys a hint, ENTER starts a new round, F2 shows the
//! leaderboard and ESC quits. `read_action` returns `None` on an idle tick so
//! the game loop can run its restart timer.

use crate::error::GameError;
use crate::game_state::{
    GameInterface, GuessReport, HintPurchase, RoundSummary, RoundView, UserAction,
};
use crate::leaderboard::LeaderboardView;
use crate::round::{GuessOutcome, RoundStatus};
use crate::wordbank::is_game_letter;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const KEYBOARD: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ-";
const KEYBOARD_ROW_LEN: usize = 14;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const MAX_LEADERBOARD_ROWS: usize = 10;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

const GALLOWS: [[&str; 6]; 7] = [
    ["  +---+", "  |   |", "      |", "      |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", "      |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", "  |   |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", " /|   |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", "      |", "========"],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " /    |", "========"],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " / \\  |", "========"],
];

/// Gallows stage for `misses` out of `max_attempts`, scaled to the drawing.
fn gallows_stage(misses: u32, max_attempts: u32) -> usize {
    if max_attempts == 0 {
        return GALLOWS.len() - 1;
    }
    let stages = (GALLOWS.len() - 1) as u32;
    (misses.min(max_attempts) * stages / max_attempts) as usize
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum KeyState {
    Unused,
    Hit,
    Miss,
}

impl KeyState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Unused => (Color::DarkGray, Color::White),
            Self::Hit => (Color::Green, Color::Black),
            Self::Miss => (Color::Gray, Color::Black),
        }
    }
}

#[derive(Debug, PartialEq)]
enum TuiState {
    Playing,
    /// Round finished; a new one starts at the deadline or on ENTER.
    RoundOver { restart_at: Instant },
    /// Remembers the restart deadline of a finished round, if any.
    ShowingLeaderboard { restart_at: Option<Instant> },
}

impl TuiState {
    fn restart_at(&self) -> Option<Instant> {
        match self {
            Self::Playing => None,
            Self::RoundOver { restart_at } => Some(*restart_at),
            Self::ShowingLeaderboard { restart_at } => *restart_at,
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: Option<&'a RoundView>,
    state: &'a TuiState,
    hint: &'a str,
    leaderboard: Option<&'a LeaderboardView>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<RoundView>,
    state: TuiState,
    hint: String,
    leaderboard: Option<LeaderboardView>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            view: None,
            state: TuiState::Playing,
            hint: String::new(),
            leaderboard: None,
            message: String::new(),
            error_message: String::new(),
            status: "Loading...".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        if let TuiState::RoundOver { restart_at } = self.state {
            let secs = restart_at
                .saturating_duration_since(Instant::now())
                .as_secs_f32()
                .ceil();
            self.status = format!("Next round in {secs:.0}s - ENTER to start now");
        }

        let ctx = RenderContext {
            view: self.view.as_ref(),
            state: &self.state,
            hint: &self.hint,
            leaderboard: self.leaderboard.as_ref(),
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(10), // Gallows and word
                Constraint::Length(4),  // Keyboard
                Constraint::Min(6),     // Info panel (takes remaining space)
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.view);
        Self::render_board(f, chunks[1], ctx.view);
        Self::render_keyboard(f, chunks[2], ctx.view);
        if matches!(ctx.state, TuiState::ShowingLeaderboard { .. }) {
            Self::render_leaderboard(f, chunks[3], ctx.leaderboard);
        } else {
            Self::render_info(f, chunks[3], ctx);
        }
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, view: Option<&RoundView>) {
        let text = match view {
            Some(view) => format!("HANGMAN    Score: {}", view.score),
            None => "HANGMAN".to_string(),
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, view: Option<&RoundView>) {
        let block = Block::default().title("Round").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(view) = view else {
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(10)])
            .split(inner);

        let stage = gallows_stage(view.max_attempts - view.attempts_remaining, view.max_attempts);
        let drawing: Vec<Line> = GALLOWS[stage].iter().map(|row| Line::from(*row)).collect();
        f.render_widget(Paragraph::new(drawing), columns[0]);

        let word_style = match view.status {
            RoundStatus::InProgress => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            RoundStatus::Won => SUCCESS_STYLE,
            RoundStatus::Lost => ERROR_STYLE,
        };
        let wrong: String = view.wrong.iter().map(|c| format!("{c} ")).collect();
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(view.display_word.clone(), word_style)),
            Line::from(""),
            Line::from(format!(
                "Guesses left: {}/{}",
                view.attempts_remaining, view.max_attempts
            )),
            Line::from(vec![
                Span::raw("Misses: "),
                Span::styled(wrong, ERROR_STYLE),
            ]),
            Line::from(""),
            Line::from(Span::styled(view.hint_label(), INFO_STYLE)),
        ];
        f.render_widget(Paragraph::new(lines), columns[1]);
    }

    fn key_state(view: Option<&RoundView>, letter: char) -> KeyState {
        match view {
            Some(view) if view.wrong.contains(&letter) => KeyState::Miss,
            Some(view) if view.guessed.contains(&letter) => KeyState::Hit,
            _ => KeyState::Unused,
        }
    }

    fn render_keyboard(f: &mut Frame, area: Rect, view: Option<&RoundView>) {
        let letters: Vec<char> = KEYBOARD.chars().collect();
        let lines: Vec<Line> = letters
            .chunks(KEYBOARD_ROW_LEN)
            .map(|row| {
                let mut spans = vec![Span::raw(" ")];
                for &letter in row {
                    let (bg, fg) = Self::key_state(view, letter).colors();
                    spans.push(Span::styled(
                        format!(" {letter} "),
                        Style::default().fg(fg).bg(bg),
                    ));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Letters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.hint.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                format!("Hint: {}", ctx.hint),
                INFO_STYLE,
            )]));
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            let style = match ctx.view.map(|v| v.status) {
                Some(RoundStatus::Won) => SUCCESS_STYLE,
                Some(RoundStatus::Lost) => ERROR_STYLE,
                _ => MESSAGE_STYLE,
            };
            lines.push(Line::from(vec![Span::styled(ctx.message, style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_leaderboard(f: &mut Frame, area: Rect, leaderboard: Option<&LeaderboardView>) {
        let mut lines = Vec::new();
        match leaderboard {
            None => lines.push(Line::from(
                "No leaderboard configured. Start with --player <NAME> to keep scores.",
            )),
            Some(view) => {
                if view.top.is_empty() {
                    lines.push(Line::from("No scores yet. Be the first!"));
                }
                for (i, entry) in view.top.iter().take(MAX_LEADERBOARD_ROWS).enumerate() {
                    lines.push(Line::from(format!(
                        "  #{} {}: {}",
                        i + 1,
                        entry.username,
                        entry.score
                    )));
                }
                lines.push(Line::from(""));
                let best = view
                    .personal_best
                    .map_or_else(|| "no scores yet".to_string(), |b| format!("{b} pts"));
                lines.push(Line::from(vec![Span::styled(
                    format!("Your best: {best}"),
                    SUCCESS_STYLE,
                )]));
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Leaderboard").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::Playing => concat!(
                "A-Z/-: Guess | TAB: Hint | F2: Leaderboard | ",
                "ENTER: New round | ESC: Quit"
            ),
            TuiState::RoundOver { .. } => "ENTER: New round now | F2: Leaderboard | ESC: Quit",
            TuiState::ShowingLeaderboard { .. } => "Any key: Back | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        // Poll with a timeout so the caller gets regular idle ticks
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        let Event::Key(key) = event else {
            debug_log!("handle_input() - Ignoring non-key event: {:?}", event);
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Filter out garbage characters that arrive from terminal focus escape sequences
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        debug_log!(
            "handle_input() - Key event: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );

        if key.code == KeyCode::Esc {
            info_log!("handle_input() - ESC pressed, returning Exit");
            return Ok(Some(UserAction::Exit));
        }

        Ok(match &self.state {
            TuiState::ShowingLeaderboard { restart_at } => {
                self.state = match *restart_at {
                    Some(restart_at) => TuiState::RoundOver { restart_at },
                    None => TuiState::Playing,
                };
                None
            }
            TuiState::Playing => self.handle_playing_input(key),
            TuiState::RoundOver { .. } => Self::handle_round_over_input(key),
        })
    }

    fn handle_playing_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        if Self::has_modifier_keys(&key) {
            debug_log!(
                "handle_playing_input() - Ignoring key with modifier: {:?}",
                key.modifiers
            );
            return None;
        }

        match key.code {
            KeyCode::Char(c) => {
                let letter = c.to_ascii_uppercase();
                if is_game_letter(letter) {
                    Some(UserAction::Guess(letter))
                } else {
                    self.error_message =
                        format!("Only letters are allowed! ('{c}' is not a letter)");
                    None
                }
            }
            KeyCode::Tab => Some(UserAction::Hint),
            KeyCode::Enter => Some(UserAction::NewRound),
            KeyCode::F(2) => Some(UserAction::ShowLeaderboard),
            _ => {
                debug_log!("handle_playing_input() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn handle_round_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('n' | 'N') => Some(UserAction::NewRound),
            KeyCode::F(2) => Some(UserAction::ShowLeaderboard),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }
}

impl GameInterface for TuiInterface {
    fn display_round(&mut self, view: &RoundView) {
        self.view = Some(view.clone());
        self.state = TuiState::Playing;
        self.hint.clear();
        self.error_message.clear();
        self.message = format!("New word: {} letters. Good luck!", view.word_len);
        self.status = "Guess a letter".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        if self.draw().is_err() {
            info_log!("read_action() - Draw failed, returning Exit");
            return Some(UserAction::Exit);
        }

        match self.handle_input() {
            Ok(action) => action,
            Err(e) => {
                debug_log!("read_action() - Input error: {}", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn display_guess(&mut self, report: &GuessReport, view: &RoundView) {
        self.view = Some(view.clone());
        self.message = match &report.outcome {
            GuessOutcome::AlreadyGuessed => format!("You already tried '{}'.", report.letter),
            GuessOutcome::RoundOver => "This round is over.".to_string(),
            GuessOutcome::Hit { positions } => {
                format!("'{}' is in the word ({}x)!", report.letter, positions.len())
            }
            GuessOutcome::Miss { attempts_remaining } => {
                format!("No '{}'. {attempts_remaining} guesses left.", report.letter)
            }
            GuessOutcome::Won | GuessOutcome::Lost => String::new(),
        };
        self.draw_or_log();
    }

    fn display_hint(&mut self, purchase: &HintPurchase) {
        match purchase {
            HintPurchase::Delivered { text, score } => {
                self.hint.clone_from(text);
                if let Some(view) = self.view.as_mut() {
                    view.score = *score;
                    view.hint_used = true;
                }
                self.status = "Hint used".to_string();
            }
            HintPurchase::Refused { cost, balance } => {
                self.error_message =
                    format!("Not enough points for a hint ({cost} required, you have {balance}).");
            }
            HintPurchase::AlreadyUsed => {
                self.error_message = "Hint already used this round.".to_string();
            }
        }
        self.draw_or_log();
    }

    fn display_round_over(&mut self, summary: &RoundSummary, restart_in: Duration) {
        self.state = TuiState::RoundOver {
            restart_at: Instant::now() + restart_in,
        };
        if let Some(view) = self.view.as_mut() {
            view.score = summary.score;
        }
        self.message = round_over_message(summary);
        self.draw_or_log();
    }

    fn display_leaderboard(&mut self, view: Option<&LeaderboardView>) {
        self.leaderboard = view.cloned();
        self.state = TuiState::ShowingLeaderboard {
            restart_at: self.state.restart_at(),
        };
        self.draw_or_log();
    }

    fn display_error(&mut self, error: &GameError) {
        self.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

fn round_over_message(summary: &RoundSummary) -> String {
    let mut message = if summary.won {
        format!(
            "You won! The word was {}. +{} points!",
            summary.word, summary.bonus
        )
    } else {
        format!("Game over! The word was: {}", summary.word)
    };
    if summary.new_personal_best {
        message.push_str(" NEW PERSONAL BEST!");
    }
    message
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallows_stage_scales() {
        assert_eq!(gallows_stage(0, 6), 0);
        assert_eq!(gallows_stage(3, 6), 3);
        assert_eq!(gallows_stage(6, 6), 6);
        assert_eq!(gallows_stage(5, 10), 3);
        assert_eq!(gallows_stage(9, 6), 6);
    }

    #[test]
    fn test_keyboard_covers_game_alphabet() {
        assert!(KEYBOARD.chars().all(is_game_letter));
        assert_eq!(KEYBOARD.len(), 27);
    }

    #[test]
    fn test_key_state() {
        let view = RoundView {
            display_word: "_ O _".to_string(),
            word_len: 3,
            guessed: vec!['O', 'Q'],
            wrong: vec!['Q'],
            attempts_remaining: 5,
            max_attempts: 6,
            status: RoundStatus::InProgress,
            score: 100,
            hint_cost: 10,
            hint_used: false,
        };
        assert_eq!(TuiInterface::key_state(Some(&view), 'O'), KeyState::Hit);
        assert_eq!(TuiInterface::key_state(Some(&view), 'Q'), KeyState::Miss);
        assert_eq!(TuiInterface::key_state(Some(&view), 'A'), KeyState::Unused);
        assert_eq!(TuiInterface::key_state(None, 'A'), KeyState::Unused);
    }

    #[test]
    fn test_round_over_message_flags_personal_best() {
        let mut summary = RoundSummary {
            won: true,
            word: "ARK".to_string(),
            revealed: "ARK".to_string(),
            bonus: 5,
            score: 105,
            new_personal_best: false,
        };
        assert_eq!(
            round_over_message(&summary),
            "You won! The word was ARK. +5 points!"
        );

        summary.new_personal_best = true;
        assert!(round_over_message(&summary).ends_with("NEW PERSONAL BEST!"));

        summary.won = false;
        assert!(round_over_message(&summary).starts_with("Game over! The word was: ARK"));
    }
}
