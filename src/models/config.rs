//! Configuration models for pokedex.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for pokedex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// PokeAPI endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Type catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Fetch cycle settings
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// PokeAPI endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the PokeAPI
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("pokedex/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Type catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Reserved type tags never shown to the user
    #[serde(default = "default_excluded_types")]
    pub excluded_types: Vec<String>,
}

fn default_excluded_types() -> Vec<String> {
    vec!["shadow".to_string(), "unknown".to_string()]
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            excluded_types: default_excluded_types(),
        }
    }
}

/// Fetch cycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Upper bound of the valid Pokémon id domain [1, max_pokemon_id]
    #[serde(default = "default_max_pokemon_id")]
    pub max_pokemon_id: u32,
}

fn default_max_pokemon_id() -> u32 {
    898
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_pokemon_id: default_max_pokemon_id(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Load from a file if it exists, otherwise fall back to defaults.
    pub fn from_file_or_default(path: &std::path::Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
