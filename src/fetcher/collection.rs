//! Entity collection builder.
//!
//! One fetch cycle produces one complete collection: either the first N
//! members of a selected type (upstream order) or N distinct randomly
//! sampled Pokémon. Any single request failure aborts the whole cycle.

use crate::client::{PokeApiClient, TypeMember};
use crate::models::{CountChoice, Pokemon, Result, Selection};
use indicatif::ProgressBar;
use rand::Rng;
use std::collections::HashSet;
use tracing::info;

/// Builds Pokémon collections from the current selection.
pub struct CollectionFetcher {
    client: PokeApiClient,
    /// Upper bound of the valid id domain [1, max_id]
    max_id: u32,
}

impl CollectionFetcher {
    /// Create a new fetcher.
    pub fn new(client: PokeApiClient, max_id: u32) -> Self {
        Self { client, max_id }
    }

    pub fn max_id(&self) -> u32 {
        self.max_id
    }

    /// Fetch the collection for a selection.
    pub async fn fetch(&self, selection: &Selection) -> Result<Vec<Pokemon>> {
        self.fetch_with_progress(selection, &ProgressBar::hidden())
            .await
    }

    /// Fetch the collection, ticking a progress bar per detail request.
    pub async fn fetch_with_progress(
        &self,
        selection: &Selection,
        progress: &ProgressBar,
    ) -> Result<Vec<Pokemon>> {
        let collection = match &selection.selected_type {
            Some(tag) => self.fetch_by_type(tag, selection.count, progress).await?,
            None => self.fetch_random(selection.count, progress).await?,
        };

        info!(
            count = collection.len(),
            type_tag = selection.selected_type.as_deref().unwrap_or("<random>"),
            "Fetch cycle complete"
        );
        Ok(collection)
    }

    /// Fetch the first N members of a type, in upstream order.
    async fn fetch_by_type(
        &self,
        tag: &str,
        count: CountChoice,
        progress: &ProgressBar,
    ) -> Result<Vec<Pokemon>> {
        let members = self.client.type_members(tag).await?;

        let selected: Vec<TypeMember> = if count.is_all() {
            members
        } else {
            members
                .into_iter()
                .take(count.resolve(self.max_id) as usize)
                .collect()
        };

        progress.set_length(selected.len() as u64);

        let mut collection = Vec::with_capacity(selected.len());
        for member in &selected {
            collection.push(self.client.pokemon_by_url(&member.url).await?);
            progress.inc(1);
        }

        Ok(collection)
    }

    /// Fetch N distinct randomly sampled Pokémon.
    async fn fetch_random(&self, count: CountChoice, progress: &ProgressBar) -> Result<Vec<Pokemon>> {
        let ids = self.sample_ids(count.resolve(self.max_id));
        progress.set_length(ids.len() as u64);

        let mut collection = Vec::with_capacity(ids.len());
        for id in ids {
            collection.push(self.client.pokemon_by_id(id).await?);
            progress.inc(1);
        }

        Ok(collection)
    }

    /// Draw `count` distinct ids uniformly from [1, max_id].
    ///
    /// Sampling without replacement by rejection: collisions are retried
    /// until the set reaches the requested size. Terminates as long as
    /// `count <= max_id`; `count == max_id` ends with full coverage.
    fn sample_ids(&self, count: u32) -> Vec<u32> {
        let count = count.min(self.max_id) as usize;
        let mut ids = HashSet::with_capacity(count);
        let mut rng = rand::rng();

        while ids.len() < count {
            ids.insert(rng.random_range(1..=self.max_id));
        }

        ids.into_iter().collect()
    }
}
