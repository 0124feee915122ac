//! Type catalog loading.

use crate::client::PokeApiClient;
use crate::models::Result;
use tracing::info;

/// Load the type catalog, dropping reserved tags.
///
/// Runs once per session. Upstream order is preserved. A failure here is
/// non-fatal for the caller: the random-sampling path works without a
/// catalog, so callers log and continue with an empty one.
pub async fn load_type_catalog(
    client: &PokeApiClient,
    excluded: &[String],
) -> Result<Vec<String>> {
    let catalog: Vec<String> = client
        .list_types()
        .await?
        .into_iter()
        .filter(|tag| !excluded.iter().any(|e| e == tag))
        .collect();

    info!(count = catalog.len(), "Loaded type catalog");
    Ok(catalog)
}
