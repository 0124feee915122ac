//! Core data types for fetched Pokémon collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One fetched Pokémon record, as consumed by the presentation layer.
///
/// Built fresh on every fetch cycle; collections are replaced wholesale,
/// never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// National dex number
    pub id: u32,

    /// Lowercase name as returned by the API
    pub name: String,

    /// Front sprite URL (the API returns null for some formes)
    pub image: Option<String>,

    /// Type tags in upstream order
    pub types: Vec<String>,
}

/// How many Pokémon a fetch cycle should produce.
///
/// Only the enumerated options are representable; `All` covers the whole
/// id domain (every member, for the type path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountChoice {
    Four,
    Six,
    Ten,
    All,
}

impl CountChoice {
    /// Resolve to a concrete count given the size of the id domain.
    pub fn resolve(&self, domain: u32) -> u32 {
        match self {
            CountChoice::Four => 4,
            CountChoice::Six => 6,
            CountChoice::Ten => 10,
            CountChoice::All => domain,
        }
    }

    /// Whether this choice means "take everything".
    pub fn is_all(&self) -> bool {
        matches!(self, CountChoice::All)
    }
}

impl Default for CountChoice {
    fn default() -> Self {
        CountChoice::Four
    }
}

impl FromStr for CountChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "4" => Ok(CountChoice::Four),
            "6" => Ok(CountChoice::Six),
            "10" => Ok(CountChoice::Ten),
            "all" => Ok(CountChoice::All),
            other => Err(format!(
                "invalid count '{other}': expected 4, 6, 10 or all"
            )),
        }
    }
}

impl fmt::Display for CountChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountChoice::Four => write!(f, "4"),
            CountChoice::Six => write!(f, "6"),
            CountChoice::Ten => write!(f, "10"),
            CountChoice::All => write!(f, "all"),
        }
    }
}

/// Current filter selection.
///
/// Changing either field invalidates the displayed collection and forces a
/// full re-fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected type tag; `None` means random sampling
    pub selected_type: Option<String>,

    /// Desired collection size
    pub count: CountChoice,
}

/// Status of the current fetch cycle.
///
/// Exactly one holds at a time. Transitions are Loading → Ready or
/// Loading → Failed; any Selection change moves back to Loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Ready,
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    /// Failure message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// An atomically-replaced collection of fetched Pokémon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub pokemon: Vec<Pokemon>,
    pub fetched_at: DateTime<Utc>,
}

impl CollectionSnapshot {
    pub fn new(pokemon: Vec<Pokemon>) -> Self {
        Self {
            pokemon,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }
}
