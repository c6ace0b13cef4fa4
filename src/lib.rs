// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod error;
pub mod game_state;
pub mod hint;
pub mod history;
pub mod leaderboard;
pub mod logging;
pub mod round;
pub mod score;
pub mod selector;
pub mod storage;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use config::GameConfig;
pub use error::GameError;
pub use game_state::{
    ActionResult, GameInterface, GameSession, GuessReport, HintPurchase, RoundSummary, RoundView,
    UserAction, game_loop,
};
pub use hint::{DatamuseHints, HintGateway, OfflineHints};
pub use history::HistoryLedger;
pub use leaderboard::{Leaderboard, LeaderboardEntry, LocalLeaderboard, Player};
pub use round::{GuessOutcome, Round, RoundStatus};
pub use score::ScoreLedger;
pub use selector::{Selection, select_word};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use wordbank::{Vocabulary, load_vocabulary, load_wordbank_from_file, load_wordbank_from_str};
