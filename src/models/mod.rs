//! Data models for pokedex.

mod config;
mod error;
mod pokemon;

pub use config::*;
pub use error::*;
pub use pokemon::*;
