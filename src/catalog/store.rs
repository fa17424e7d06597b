use crate::catalog::models::{Catalog, RoundDefinition};
use crate::geo::models::LatLng;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared catalog, tagged with a generation that moves forward on every reload. Anything
/// working on behalf of an older generation must drop its results.
#[derive(Clone, Default)]
pub struct CatalogStore {
    storage: Arc<RwLock<Catalog>>,
}

impl CatalogStore {
    pub fn new(rounds: Vec<RoundDefinition>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(Catalog {
                generation: 1,
                rounds,
                backfill_started: false,
            })),
        }
    }

    /// Swaps in a freshly loaded dataset and returns its generation.
    pub async fn replace(&self, rounds: Vec<RoundDefinition>) -> u64 {
        let mut catalog = self.storage.write().await;
        catalog.generation += 1;
        catalog.rounds = rounds;
        catalog.backfill_started = false;
        catalog.generation
    }

    pub async fn generation(&self) -> u64 {
        self.storage.read().await.generation
    }

    pub async fn snapshot(&self) -> Catalog {
        self.storage.read().await.clone()
    }

    /// Marks the backfill of `generation` as started. Returns `false` if it already ran (or
    /// is running) or if `generation` is stale.
    pub async fn begin_backfill(&self, generation: u64) -> bool {
        let mut catalog = self.storage.write().await;
        if catalog.generation != generation || catalog.backfill_started {
            return false;
        }
        catalog.backfill_started = true;
        true
    }

    /// Entries of `generation` that still lack imagery, or `None` if `generation` is stale.
    pub async fn pending_imagery(&self, generation: u64) -> Option<Vec<(String, LatLng)>> {
        let catalog = self.storage.read().await;
        if catalog.generation != generation {
            return None;
        }
        Some(
            catalog
                .rounds
                .iter()
                .filter(|round| round.needs_imagery())
                .map(|round| (round.id.clone(), round.answer))
                .collect(),
        )
    }

    /// Fills in the imagery reference of one entry. Refuses stale generations and entries that
    /// got resolved in the meantime.
    pub async fn apply_imagery(&self, generation: u64, location_id: &str, image_id: &str) -> bool {
        let mut catalog = self.storage.write().await;
        if catalog.generation != generation {
            return false;
        }
        match catalog
            .rounds
            .iter_mut()
            .find(|round| round.id == location_id && !round.has_imagery())
        {
            Some(round) => {
                round.imagery_ref = image_id.to_string();
                true
            }
            None => false,
        }
    }
}
