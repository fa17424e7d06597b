use crate::app_context::AppContext;
use crate::storage::games::HashMapGamesStorage;

pub mod backfill;
pub mod consts;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod responses;
pub mod store;

/// Starts the imagery backfill for `generation` unless it already started.
pub async fn start_backfill(app_context: &AppContext<HashMapGamesStorage>, generation: u64) {
    app_context
        .backfill
        .spawn(
            app_context.catalog.clone(),
            app_context.games.clone(),
            app_context.imagery.clone(),
            generation,
        )
        .await;
}

/// Reloads the catalog from its configured sources, bumps its generation and restarts the
/// backfill. Games already in progress keep the rounds they started with.
pub async fn reload(app_context: &AppContext<HashMapGamesStorage>) -> u64 {
    let rounds = loader::load(&app_context.catalog_sources, &app_context.http_client).await;
    let generation = app_context.catalog.replace(rounds).await;
    start_backfill(app_context, generation).await;
    generation
}
