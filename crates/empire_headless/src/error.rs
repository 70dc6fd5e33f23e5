//! Error types for the headless runner.

use std::path::PathBuf;

use empire_advisor::AdvisorError;

/// Errors that end a session or a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading commands or writing responses failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A script file could not be read.
    #[error("Failed to read script file '{path}': {source}")]
    ScriptRead {
        /// Script path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A script line is not a valid command.
    #[error("Script line {line}: {message}")]
    ScriptParse {
        /// 1-based line number.
        line: usize,
        /// Parse error.
        message: String,
    },

    /// The advisor could not be configured.
    #[error("Advisor setup failed: {0}")]
    Advisor(#[from] AdvisorError),

    /// The initial game data is invalid.
    #[error("Game setup failed: {0}")]
    Game(#[from] empire_core::error::GameError),
}
