use crate::app_context::AppContext;
use crate::cli::ServeArgs;
use crate::http::{cors_layer, middleware};
use crate::storage::games::HashMapGamesStorage;
use crate::{catalog, game, health, imagery};
use axum::{
    routing::{get, post},
    Router,
};

pub fn new(args: &ServeArgs, app_context: AppContext<HashMapGamesStorage>) -> Router {
    let cors_policy = cors_layer(args);
    tracing::info!("Initialized HTTP configuration.");

    let health_routes = Router::new().route("/check", get(health::handlers::healthcheck));
    let catalog_routes = Router::new()
        .route("/", get(catalog::handlers::status))
        .route("/reload", post(catalog::handlers::reload));
    let games_routes = Router::new()
        .route("/", post(game::handlers::create))
        .route("/:game-id", get(game::handlers::view))
        .route("/:game-id/guess", post(game::handlers::set_guess))
        .route("/:game-id/submit", post(game::handlers::submit))
        .route("/:game-id/advance", post(game::handlers::advance))
        .route("/:game-id/restart", post(game::handlers::restart))
        .route("/:game-id/results", get(game::handlers::results));
    let imagery_routes = Router::new()
        .route("/nearest", get(imagery::handlers::nearest_image))
        .route("/viewer-config", get(imagery::handlers::viewer_config))
        .layer(axum::middleware::from_fn_with_state(
            app_context.clone(),
            middleware::imagery_guard,
        ));

    Router::new()
        .nest("/health", health_routes)
        .nest("/catalog", catalog_routes)
        .nest("/games", games_routes)
        .nest("/imagery", imagery_routes)
        .with_state(app_context)
        .layer(cors_policy)
        .layer(axum::middleware::from_fn(middleware::tracing))
}
