//! PokeAPI client module.

mod pokeapi;

pub use pokeapi::*;
