use crate::app_context::AppContext;
use crate::catalog;
use crate::catalog::responses::CatalogStatusResponse;
use crate::storage::games::HashMapGamesStorage;
use axum::extract::State;
use axum::response::Json;

#[axum::debug_handler]
pub async fn status(
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<CatalogStatusResponse> {
    let catalog = app_context.catalog.snapshot().await;
    Json(CatalogStatusResponse {
        error: false,
        generation: catalog.generation,
        round_count: catalog.rounds.len(),
        unresolved_imagery: catalog.unresolved_count(),
    })
}

#[axum::debug_handler]
pub async fn reload(
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<CatalogStatusResponse> {
    let generation = catalog::reload(&app_context).await;
    tracing::info!("Catalog reloaded, now at generation {generation}.");
    status(State(app_context)).await
}
