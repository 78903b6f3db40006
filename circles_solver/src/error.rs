//! Error types for the puzzle core and its configuration.

use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by [`Game`](crate::engine::Game) operations and the text codecs.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// A solver currently owns the puzzle; moves and new searches must wait.
    #[error("a solver is running; wait for it to finish or cancel it")]
    Busy,

    /// Hypothetical scoring was requested before any snapshot was saved.
    #[error("no snapshot has been saved")]
    NoSnapshot,

    #[error("unrecognized move character '{0}'")]
    InvalidMove(char),

    #[error("unrecognized color character '{ch}' at slot {slot}")]
    InvalidColor { ch: char, slot: usize },

    #[error("expected {expected} colors, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
