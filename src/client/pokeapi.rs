//! HTTP client for the public PokeAPI.
//!
//! Three endpoints are used:
//! - `/type`: the type catalog
//! - `/type/{tag}`: members of one type
//! - `/pokemon/{id}/` or a member URL: full detail for one Pokémon

use crate::models::{ApiConfig, Pokemon, PokedexError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// A named API resource reference: `{ name, url }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeMember {
    pub name: String,
    pub url: String,
}

/// Response of the type catalog endpoint.
#[derive(Debug, Deserialize)]
struct TypeListResponse {
    results: Vec<TypeMember>,
}

/// Response of the type member endpoint.
#[derive(Debug, Deserialize)]
struct TypeMembersResponse {
    pokemon: Vec<TypeMemberSlot>,
}

#[derive(Debug, Deserialize)]
struct TypeMemberSlot {
    pokemon: TypeMember,
}

/// Detail record for a single Pokémon.
#[derive(Debug, Deserialize)]
struct PokemonDetail {
    id: u32,
    name: String,
    sprites: Sprites,
    types: Vec<TypeSlot>,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_ref: TypeName,
}

#[derive(Debug, Deserialize)]
struct TypeName {
    name: String,
}

impl From<PokemonDetail> for Pokemon {
    fn from(detail: PokemonDetail) -> Self {
        Pokemon {
            id: detail.id,
            name: detail.name,
            image: detail.sprites.front_default,
            types: detail.types.into_iter().map(|t| t.type_ref.name).collect(),
        }
    }
}

/// Client for the PokeAPI.
///
/// No retries and no rate-limit handling: a failed request surfaces
/// immediately as an error.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a new client from API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PokedexError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// HTTP GET + status check + JSON parse helper.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, context: &str) -> Result<T> {
        debug!(url = url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(PokedexError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PokedexError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PokedexError::Parse(format!("Failed to parse {context} response: {e}")))
    }

    /// List all type tags known upstream, in upstream order, unfiltered.
    pub async fn list_types(&self) -> Result<Vec<String>> {
        let url = format!("{}/type", self.base_url);
        let body: TypeListResponse = self.get_json(&url, "type catalog").await?;
        Ok(body.results.into_iter().map(|t| t.name).collect())
    }

    /// List members of one type tag, in upstream order.
    pub async fn type_members(&self, tag: &str) -> Result<Vec<TypeMember>> {
        let url = format!("{}/type/{}", self.base_url, tag);
        let body: TypeMembersResponse = self.get_json(&url, "type members").await?;
        Ok(body.pokemon.into_iter().map(|slot| slot.pokemon).collect())
    }

    /// Fetch one Pokémon's detail record by id.
    pub async fn pokemon_by_id(&self, id: u32) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}/", self.base_url, id);
        let detail: PokemonDetail = self.get_json(&url, "pokemon detail").await?;
        Ok(detail.into())
    }

    /// Fetch one Pokémon's detail record by a member URL.
    pub async fn pokemon_by_url(&self, url: &str) -> Result<Pokemon> {
        let detail: PokemonDetail = self.get_json(url, "pokemon detail").await?;
        Ok(detail.into())
    }
}
