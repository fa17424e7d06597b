use crate::app_context::{AppContext, RequestContext};
use crate::game::responses::{CreateGameResponse, GameResponse, GameResultsResponse};
use crate::game::services::{CreateGameHttpHandler, GameHttpHandler};
use crate::geo::models::LatLng;
use crate::http::middleware::client_ip;
use crate::storage::games::HashMapGamesStorage;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Json;

fn request_context(game_id: String, headers: &HeaderMap) -> RequestContext {
    RequestContext {
        game_id,
        client_ip: client_ip(headers),
    }
}

#[axum::debug_handler]
pub async fn create(
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<CreateGameResponse> {
    let response = CreateGameHttpHandler::new(app_context).create().await;
    Json(response)
}

#[axum::debug_handler]
pub async fn view(
    Path(game_id): Path<String>,
    headers: HeaderMap,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<GameResponse> {
    let request_context = request_context(game_id, &headers);
    let response = GameHttpHandler::new(app_context, &request_context)
        .view()
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn set_guess(
    Path(game_id): Path<String>,
    headers: HeaderMap,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
    Json(guess): Json<LatLng>,
) -> Json<GameResponse> {
    let request_context = request_context(game_id, &headers);
    let response = GameHttpHandler::new(app_context, &request_context)
        .set_guess(guess)
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn submit(
    Path(game_id): Path<String>,
    headers: HeaderMap,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<GameResponse> {
    let request_context = request_context(game_id, &headers);
    let response = GameHttpHandler::new(app_context, &request_context)
        .submit()
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn advance(
    Path(game_id): Path<String>,
    headers: HeaderMap,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<GameResponse> {
    let request_context = request_context(game_id, &headers);
    let response = GameHttpHandler::new(app_context, &request_context)
        .advance()
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn restart(
    Path(game_id): Path<String>,
    headers: HeaderMap,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<GameResponse> {
    let request_context = request_context(game_id, &headers);
    let response = GameHttpHandler::new(app_context, &request_context)
        .restart()
        .await;
    Json(response)
}

#[axum::debug_handler]
pub async fn results(
    Path(game_id): Path<String>,
    headers: HeaderMap,
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Json<GameResultsResponse> {
    let request_context = request_context(game_id, &headers);
    let response = GameHttpHandler::new(app_context, &request_context)
        .results()
        .await;
    Json(response)
}
