use anyhow::Context;
use hangman::cli::{CliInterface, parse_cli};
use hangman::hint::{DatamuseHints, HintGateway, OfflineHints};
use hangman::leaderboard::{LocalLeaderboard, Player};
use hangman::logging::{self, LOG_FILE_NAME, LogTarget};
use hangman::storage::{self, FileStore, KeyValueStore, LEADERBOARD_FILE_NAME, MemoryStore};
use hangman::tui::TuiInterface;
use hangman::{GameSession, game_loop, load_vocabulary};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use std::io;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();

    let data_dir = match &cli.data_dir {
        Some(dir) => Some(dir.clone()),
        None if cli.ephemeral => None,
        None => storage::default_data_dir(),
    };

    let log_target = match (&data_dir, cli.tui) {
        (Some(dir), true) => LogTarget::File(dir.join(LOG_FILE_NAME)),
        (None, true) => LogTarget::File(std::env::temp_dir().join(LOG_FILE_NAME)),
        (_, false) => LogTarget::Stderr,
    };
    logging::init(log_target).context("initialising logger")?;

    let vocabulary = load_vocabulary(cli.wordbank_path.as_deref());
    if !cli.tui {
        println!("Loaded {} words.", vocabulary.len());
    }

    let config = cli.game_config();
    let store = open_store(&data_dir, cli.ephemeral, None)?;
    let hints: Box<dyn HintGateway> = if cli.offline {
        Box::new(OfflineHints)
    } else {
        match DatamuseHints::new(config.hint_endpoint.clone(), config.max_hint_terms) {
            Ok(hints) => {
                log::info!("Hints from {}", hints.endpoint());
                Box::new(hints)
            }
            Err(e) => {
                log::warn!("Could not set up the hint client ({e}); playing offline");
                Box::new(OfflineHints)
            }
        }
    };
    let rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_os_rng()),
    };

    let mut session = GameSession::new(config, vocabulary, store, hints, rng);
    if let Some(name) = cli.player.as_deref().filter(|n| !n.trim().is_empty()) {
        let board_store = open_store(&data_dir, cli.ephemeral, Some(LEADERBOARD_FILE_NAME))?;
        session = session.with_leaderboard(
            Box::new(LocalLeaderboard::new(board_store)),
            Player::named(name),
        );
    }

    if cli.tui {
        let mut interface = TuiInterface::new().context("setting up the terminal")?;
        let result = game_loop(&mut session, &mut interface);
        interface.cleanup().context("restoring the terminal")?;
        result?;
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut session, &mut interface)?;
    }
    Ok(())
}

/// Opens the file-backed store in `data_dir`, or an in-memory one.
fn open_store(
    data_dir: &Option<PathBuf>,
    ephemeral: bool,
    file_name: Option<&str>,
) -> anyhow::Result<Box<dyn KeyValueStore>> {
    let dir = match data_dir {
        Some(dir) if !ephemeral => dir,
        _ => {
            log::info!("Using in-memory storage");
            return Ok(Box::new(MemoryStore::new()));
        }
    };

    let store = match file_name {
        Some(name) => FileStore::open_named(dir, name),
        None => FileStore::open(dir),
    }
    .with_context(|| format!("opening data directory {}", dir.display()))?;
    log::info!("Using store at {}", store.path().display());
    Ok(Box::new(store))
}
