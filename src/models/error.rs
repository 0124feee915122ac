//! Error types for pokedex.

use thiserror::Error;

/// Top-level error type for pokedex.
#[derive(Debug, Error)]
pub enum PokedexError {
    #[error("Configuration error: {0}")]
    Config(#[from] super::ConfigError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
