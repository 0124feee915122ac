//! Text rendering of collections and the type catalog.
//!
//! Capitalization happens here only; underlying data stays lowercase.

use crate::fetcher::FetchSession;
use crate::models::{CollectionSnapshot, FetchStatus, Pokemon};
use std::fmt::Write;

/// Uppercase the first letter for display.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Render one Pokémon as a text card.
pub fn render_pokemon(pokemon: &Pokemon) -> String {
    let types: Vec<String> = pokemon.types.iter().map(|t| capitalize(t)).collect();
    let mut out = String::new();

    let _ = writeln!(out, "#{:03} {}", pokemon.id, capitalize(&pokemon.name));
    let _ = writeln!(out, "  Types: {}", types.join(", "));
    if let Some(image) = &pokemon.image {
        let _ = writeln!(out, "  Image: {image}");
    }

    out
}

/// Render a full collection snapshot.
pub fn render_collection(snapshot: &CollectionSnapshot) -> String {
    let mut out = String::new();
    for pokemon in &snapshot.pokemon {
        out.push_str(&render_pokemon(pokemon));
    }
    let _ = writeln!(
        out,
        "{} Pokémon (fetched {})",
        snapshot.len(),
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}

/// Render the type catalog, one capitalized tag per line.
pub fn render_catalog(catalog: &[String]) -> String {
    catalog
        .iter()
        .map(|tag| capitalize(tag) + "\n")
        .collect()
}

/// Render session state: status banner plus whatever was last fetched.
///
/// A failure banner is shown alongside the stale snapshot, matching the
/// status/snapshot independence of the session.
pub fn render_session(session: &FetchSession) -> String {
    let mut out = String::new();

    match session.status() {
        FetchStatus::Loading => out.push_str("Loading Pokémon...\n"),
        FetchStatus::Failed(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        FetchStatus::Ready => {}
    }

    if let Some(snapshot) = session.snapshot() {
        out.push_str(&render_collection(snapshot));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountChoice, PokedexError};
    use pretty_assertions::assert_eq;

    fn mon(id: u32, name: &str, types: &[&str]) -> Pokemon {
        Pokemon {
            id,
            name: name.to_string(),
            image: Some(format!("http://img/{id}.png")),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn capitalize_uppercases_first_letter_only() {
        assert_eq!(capitalize("pikachu"), "Pikachu");
        assert_eq!(capitalize("mr-mime"), "Mr-mime");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("X"), "X");
    }

    #[test]
    fn card_shows_capitalized_name_and_types() {
        let card = render_pokemon(&mon(92, "gastly", &["ghost", "poison"]));
        assert!(card.contains("#092 Gastly"));
        assert!(card.contains("Types: Ghost, Poison"));
        assert!(card.contains("Image: http://img/92.png"));
    }

    #[test]
    fn card_omits_missing_image() {
        let mut pokemon = mon(132, "ditto", &["normal"]);
        pokemon.image = None;
        let card = render_pokemon(&pokemon);
        assert!(!card.contains("Image:"));
    }

    #[test]
    fn rendering_does_not_mutate_underlying_data() {
        let pokemon = mon(25, "pikachu", &["electric"]);
        render_pokemon(&pokemon);
        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(pokemon.types, vec!["electric"]);
    }

    #[test]
    fn failed_session_renders_error_beside_stale_snapshot() {
        let mut session = FetchSession::new();
        let token = session.refresh();
        session.complete_cycle(token, Ok(vec![mon(25, "pikachu", &["electric"])]));

        let token = session.select_count(CountChoice::Ten);
        session.complete_cycle(
            token,
            Err(PokedexError::Internal("upstream gone".to_string())),
        );

        let rendered = render_session(&session);
        assert!(rendered.contains("Error: Internal error: upstream gone"));
        assert!(rendered.contains("Pikachu"));
    }

    #[test]
    fn catalog_renders_one_tag_per_line() {
        let catalog = vec!["fire".to_string(), "water".to_string()];
        assert_eq!(render_catalog(&catalog), "Fire\nWater\n");
    }
}
