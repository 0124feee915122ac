//! Selection state and fetch cycle bookkeeping.
//!
//! Every Selection change starts a new fetch cycle. Cycles are identified by
//! a monotonic generation number; a completion whose token is no longer
//! current is dropped, so a slow, superseded response can never overwrite the
//! collection of a newer cycle.

use crate::fetcher::CollectionFetcher;
use crate::models::{
    CollectionSnapshot, CountChoice, FetchStatus, Pokemon, Result, Selection,
};
use indicatif::ProgressBar;
use tracing::debug;

/// Token identifying one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleToken(u64);

impl CycleToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Session state: current selection, fetch status and the last successful
/// collection snapshot.
///
/// Status and snapshot are deliberately independent: a failed cycle leaves
/// the previous snapshot in place, shown beside the failure message.
#[derive(Debug)]
pub struct FetchSession {
    selection: Selection,
    status: FetchStatus,
    snapshot: Option<CollectionSnapshot>,
    generation: u64,
}

impl FetchSession {
    /// Create a session with the default selection (random, count 4).
    pub fn new() -> Self {
        Self {
            selection: Selection::default(),
            status: FetchStatus::Loading,
            snapshot: None,
            generation: 0,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// Last successfully fetched collection, if any.
    pub fn snapshot(&self) -> Option<&CollectionSnapshot> {
        self.snapshot.as_ref()
    }

    /// Select a type tag (`None` for random sampling) and start a new cycle.
    pub fn select_type(&mut self, tag: Option<String>) -> CycleToken {
        self.selection.selected_type = tag;
        self.invalidate()
    }

    /// Select a count and start a new cycle.
    pub fn select_count(&mut self, count: CountChoice) -> CycleToken {
        self.selection.count = count;
        self.invalidate()
    }

    /// Start a new cycle for the current selection.
    pub fn refresh(&mut self) -> CycleToken {
        self.invalidate()
    }

    fn invalidate(&mut self) -> CycleToken {
        self.generation += 1;
        self.status = FetchStatus::Loading;
        CycleToken(self.generation)
    }

    /// Apply the outcome of a fetch cycle.
    ///
    /// Returns `false` and leaves all state untouched when the token has
    /// been superseded by a newer cycle. For a current token the status is
    /// always finalized: Ready on success (snapshot replaced wholesale),
    /// Failed with the error's display text on failure (snapshot kept).
    pub fn complete_cycle(
        &mut self,
        token: CycleToken,
        outcome: Result<Vec<Pokemon>>,
    ) -> bool {
        if token.0 != self.generation {
            debug!(
                token = token.0,
                current = self.generation,
                "Dropping stale fetch cycle completion"
            );
            return false;
        }

        match outcome {
            Ok(pokemon) => {
                self.snapshot = Some(CollectionSnapshot::new(pokemon));
                self.status = FetchStatus::Ready;
            }
            Err(e) => {
                self.status = FetchStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// Drive one full fetch cycle for the current selection.
    pub async fn run_cycle(&mut self, fetcher: &CollectionFetcher) -> bool {
        self.run_cycle_with_progress(fetcher, &ProgressBar::hidden())
            .await
    }

    /// Drive one full cycle, ticking a progress bar per detail request.
    pub async fn run_cycle_with_progress(
        &mut self,
        fetcher: &CollectionFetcher,
        progress: &ProgressBar,
    ) -> bool {
        let token = self.refresh();
        let selection = self.selection.clone();
        let outcome = fetcher.fetch_with_progress(&selection, progress).await;
        self.complete_cycle(token, outcome)
    }
}

impl Default for FetchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PokedexError;
    use pretty_assertions::assert_eq;

    fn mon(id: u32, name: &str) -> Pokemon {
        Pokemon {
            id,
            name: name.to_string(),
            image: None,
            types: vec!["normal".to_string()],
        }
    }

    #[test]
    fn successful_cycle_replaces_snapshot_and_becomes_ready() {
        let mut session = FetchSession::new();
        assert!(session.status().is_loading());

        let token = session.refresh();
        assert!(session.complete_cycle(token, Ok(vec![mon(1, "bulbasaur")])));

        assert_eq!(*session.status(), FetchStatus::Ready);
        assert_eq!(session.snapshot().unwrap().len(), 1);
    }

    #[test]
    fn failed_cycle_keeps_previous_snapshot() {
        let mut session = FetchSession::new();
        let token = session.refresh();
        session.complete_cycle(token, Ok(vec![mon(4, "charmander"), mon(7, "squirtle")]));

        let token = session.select_count(CountChoice::Ten);
        assert!(session.status().is_loading());
        let applied = session.complete_cycle(
            token,
            Err(PokedexError::Internal("detail fetch exploded".to_string())),
        );

        assert!(applied);
        assert!(!session.status().is_loading());
        assert_eq!(
            session.status().error_message(),
            Some("Internal error: detail fetch exploded")
        );
        // Stale content stays on screen beside the failure message
        let names: Vec<&str> = session
            .snapshot()
            .unwrap()
            .pokemon
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["charmander", "squirtle"]);
    }

    #[test]
    fn selection_change_forces_loading() {
        let mut session = FetchSession::new();
        let token = session.refresh();
        session.complete_cycle(token, Ok(vec![mon(1, "bulbasaur")]));
        assert_eq!(*session.status(), FetchStatus::Ready);

        session.select_type(Some("fire".to_string()));
        assert!(session.status().is_loading());
        assert_eq!(
            session.selection().selected_type.as_deref(),
            Some("fire")
        );
    }

    #[test]
    fn stale_success_is_dropped() {
        let mut session = FetchSession::new();
        let slow = session.select_type(Some("water".to_string()));
        let current = session.select_count(CountChoice::Six);

        // The superseded cycle resolves last in wall time but first here;
        // either way its outcome must not apply.
        assert!(!session.complete_cycle(slow, Ok(vec![mon(7, "squirtle")])));
        assert!(session.status().is_loading());
        assert!(session.snapshot().is_none());

        assert!(session.complete_cycle(current, Ok(vec![mon(54, "psyduck")])));
        assert_eq!(*session.status(), FetchStatus::Ready);
        assert_eq!(session.snapshot().unwrap().pokemon[0].name, "psyduck");
    }

    #[test]
    fn stale_failure_is_dropped_too() {
        let mut session = FetchSession::new();
        let slow = session.refresh();
        let current = session.refresh();

        assert!(!session.complete_cycle(
            slow,
            Err(PokedexError::Internal("old cycle".to_string()))
        ));
        assert!(session.status().is_loading());

        session.complete_cycle(current, Ok(vec![mon(1, "bulbasaur")]));
        assert_eq!(*session.status(), FetchStatus::Ready);
    }

    #[tokio::test]
    async fn run_cycle_fetches_the_selection_and_becomes_ready() {
        use crate::client::PokeApiClient;
        use crate::models::ApiConfig;
        use serde_json::json;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let base = format!("{}/api/v2", server.uri());

        Mock::given(method("GET"))
            .and(path("/api/v2/type/electric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pokemon": [
                    {"pokemon": {"name": "pikachu", "url": format!("{base}/pokemon/25/")}},
                    {"pokemon": {"name": "raichu", "url": format!("{base}/pokemon/26/")}}
                ]
            })))
            .mount(&server)
            .await;
        for (id, name) in [(25u32, "pikachu"), (26, "raichu")] {
            Mock::given(method("GET"))
                .and(path(format!("/api/v2/pokemon/{id}/")))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "id": id,
                    "name": name,
                    "sprites": {"front_default": null},
                    "types": [{"slot": 1, "type": {"name": "electric", "url": "u"}}]
                })))
                .mount(&server)
                .await;
        }

        let config = ApiConfig {
            base_url: base,
            ..ApiConfig::default()
        };
        let fetcher = CollectionFetcher::new(PokeApiClient::new(&config).unwrap(), 898);

        let mut session = FetchSession::new();
        session.select_type(Some("electric".to_string()));
        session.select_count(CountChoice::All);

        assert!(session.run_cycle(&fetcher).await);
        assert_eq!(*session.status(), FetchStatus::Ready);
        let names: Vec<&str> = session
            .snapshot()
            .unwrap()
            .pokemon
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["pikachu", "raichu"]);
    }

    #[tokio::test]
    async fn run_cycle_finalizes_status_on_failure() {
        use crate::client::PokeApiClient;
        use crate::models::ApiConfig;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/type/ghost"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream gone"))
            .mount(&server)
            .await;

        let config = ApiConfig {
            base_url: format!("{}/api/v2", server.uri()),
            ..ApiConfig::default()
        };
        let fetcher = CollectionFetcher::new(PokeApiClient::new(&config).unwrap(), 898);

        let mut session = FetchSession::new();
        session.select_type(Some("ghost".to_string()));

        assert!(session.run_cycle(&fetcher).await);
        assert!(!session.status().is_loading());
        assert_eq!(
            session.status().error_message(),
            Some("API error (status 500): upstream gone")
        );
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn tokens_are_monotonic() {
        let mut session = FetchSession::new();
        let a = session.refresh();
        let b = session.select_count(CountChoice::All);
        let c = session.select_type(None);
        assert!(a.generation() < b.generation());
        assert!(b.generation() < c.generation());
    }
}
