use crate::app_context::AppContext;
use crate::health::responses::HealthCheckResponse;
use crate::storage::games::HashMapGamesStorage;
use axum::extract::State;
use axum::response::Json;

#[axum::debug_handler]
pub async fn healthcheck(
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<HealthCheckResponse> {
    let catalog = app_context.catalog.snapshot().await;
    Json(HealthCheckResponse {
        error: false,
        catalog_generation: catalog.generation,
        round_count: catalog.rounds.len(),
    })
}
