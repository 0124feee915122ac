//! pokedex - Pokémon collection fetcher for the public PokeAPI.
//!
//! ## Architecture
//!
//! - **client**: HTTP access to the PokeAPI (type catalog, type members,
//!   Pokémon detail)
//! - **fetcher**: fetch cycle orchestration: the type catalog loader, the
//!   collection builder and the session that guards against stale cycles
//! - **models**: domain types, configuration and errors
//! - **render**: display-only text formatting
//!
//! One fetch cycle turns the current selection (type tag + count) into a
//! complete collection, replaced atomically; any request failure aborts the
//! whole cycle.

pub mod client;
pub mod fetcher;
pub mod models;
pub mod render;

// Re-exports for convenience
pub use client::{PokeApiClient, TypeMember};
pub use fetcher::{load_type_catalog, CollectionFetcher, CycleToken, FetchSession};
pub use models::{
    CollectionSnapshot, Config, CountChoice, FetchStatus, Pokemon, PokedexError, Result,
    Selection,
};
