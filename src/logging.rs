// Logger setup plus conditional logging macros that are only active in debug builds

use env_logger::{Builder, Env, Target};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "hangman.log";

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Used while the TUI owns the terminal.
    File(PathBuf),
}

/// Installs the global logger. `RUST_LOG` overrides the default `warn` filter.
pub fn init(target: LogTarget) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = File::options().create(true).append(true).open(&path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    builder
        .try_init()
        .map_err(|e| io::Error::other(format!("logger already initialised: {e}")))
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}
