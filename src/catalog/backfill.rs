use crate::catalog::store::CatalogStore;
use crate::imagery::errors::ImageryError;
use crate::imagery::ImageryLookup;
use crate::storage::games::HashMapGamesStorage;
use crate::storage::interface::GameImageryRepo;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub resolved: usize,
    pub unresolved: usize,
    pub rate_limited: usize,
    pub cancelled: bool,
}

/// Owns the running backfill task, if any. A start that claims a new generation aborts the
/// previous task. A start for a generation that was already claimed leaves everything running.
#[derive(Clone)]
pub struct BackfillHandle {
    delay: Duration,
    task: Arc<Mutex<Option<JoinHandle<BackfillReport>>>>,
}

impl BackfillHandle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            task: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns `false` when `generation` is stale or its backfill already started.
    pub async fn spawn(
        &self,
        catalog: CatalogStore,
        games: HashMapGamesStorage,
        imagery: Arc<dyn ImageryLookup>,
        generation: u64,
    ) -> bool {
        let mut task_guard = self.task.lock().await;
        if !catalog.begin_backfill(generation).await {
            tracing::debug!("Backfill for generation {generation} already claimed.");
            return false;
        }
        if let Some(previous) = task_guard.take() {
            previous.abort();
        }
        let delay = self.delay;
        *task_guard = Some(tokio::spawn(async move {
            resolve_pending(&catalog, &games, &*imagery, generation, delay).await
        }));
        true
    }

    /// Waits for the current task to finish. `None` if nothing ran or the task was aborted.
    #[cfg(test)]
    pub async fn join(&self) -> Option<BackfillReport> {
        let task = self.task.lock().await.take()?;
        task.await.ok()
    }
}

/// Claims `generation` and resolves it in place. Does nothing if the claim fails.
#[cfg(test)]
pub async fn run(
    catalog: &CatalogStore,
    games: &HashMapGamesStorage,
    imagery: &dyn ImageryLookup,
    generation: u64,
    delay: Duration,
) -> BackfillReport {
    if !catalog.begin_backfill(generation).await {
        return BackfillReport::default();
    }
    resolve_pending(catalog, games, imagery, generation, delay).await
}

/// Resolves missing imagery references of `generation`, one lookup at a time, publishing each
/// hit to the catalog and to the games built from it. Gives up as soon as the catalog moves to
/// another generation. Callers must have claimed the generation first.
async fn resolve_pending(
    catalog: &CatalogStore,
    games: &HashMapGamesStorage,
    imagery: &dyn ImageryLookup,
    generation: u64,
    delay: Duration,
) -> BackfillReport {
    let mut report = BackfillReport::default();
    let Some(pending) = catalog.pending_imagery(generation).await else {
        report.cancelled = true;
        return report;
    };
    for (position, (location_id, answer)) in pending.iter().enumerate() {
        if position > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if catalog.generation().await != generation {
            report.cancelled = true;
            break;
        }
        match imagery.lookup_nearest(*answer).await {
            Ok(Some(image_id)) => {
                if !catalog.apply_imagery(generation, location_id, &image_id).await {
                    if catalog.generation().await != generation {
                        report.cancelled = true;
                        break;
                    }
                    continue;
                }
                games.apply_imagery(generation, location_id, &image_id).await;
                report.resolved += 1;
            }
            Ok(None) => {
                tracing::debug!("No imagery near `{location_id}`.");
                report.unresolved += 1;
            }
            Err(ImageryError::TooManyRequests) => {
                tracing::warn!("Imagery lookup for `{location_id}` was rate-limited, skipping.");
                report.rate_limited += 1;
                report.unresolved += 1;
            }
            Err(err) => {
                tracing::warn!("Imagery lookup for `{location_id}` failed: {err}");
                report.unresolved += 1;
            }
        }
    }
    tracing::info!(
        task = "imagery_backfill",
        catalog_generation = generation,
        resolved = report.resolved as u64,
        unresolved = report.unresolved as u64,
        rate_limited = report.rate_limited as u64,
        cancelled = report.cancelled,
    );
    report
}
