use crate::app_context::AppContext;
use crate::geo::models::LatLng;
use crate::imagery::errors::ImageryError;
use crate::imagery::responses::{ImageryErrorCode, NearestImageResponse, ViewerConfigResponse};
use crate::storage::games::HashMapGamesStorage;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NearestImageQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl NearestImageQuery {
    fn point(&self) -> Option<LatLng> {
        let lat = self.lat.as_deref()?.trim().parse().ok()?;
        let lng = self.lng.as_deref()?.trim().parse().ok()?;
        Some(LatLng::new(lat, lng)).filter(LatLng::is_valid)
    }
}

#[axum::debug_handler]
pub async fn nearest_image(
    State(app_context): State<AppContext<HashMapGamesStorage>>,
    Query(query): Query<NearestImageQuery>,
) -> (StatusCode, Json<NearestImageResponse>) {
    let Some(point) = query.point() else {
        return nearest_image_error(StatusCode::BAD_REQUEST, ImageryErrorCode::MissingCoordinates);
    };
    match app_context.imagery.lookup_nearest(point).await {
        Ok(image_id) => (
            StatusCode::OK,
            Json(NearestImageResponse {
                error: false,
                error_code: None,
                image_id,
            }),
        ),
        Err(err) => {
            tracing::warn!("Nearest image lookup failed: {err}");
            let (status, error_code) = match err {
                ImageryError::Configuration => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ImageryErrorCode::TokenNotConfigured,
                ),
                ImageryError::TooManyRequests => (
                    StatusCode::TOO_MANY_REQUESTS,
                    ImageryErrorCode::TooManyRequests,
                ),
                ImageryError::Upstream { status } => (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    ImageryErrorCode::UpstreamUnavailable,
                ),
                ImageryError::Network(_) | ImageryError::Decode(_) => {
                    (StatusCode::BAD_GATEWAY, ImageryErrorCode::UpstreamUnavailable)
                }
            };
            nearest_image_error(status, error_code)
        }
    }
}

#[axum::debug_handler]
pub async fn viewer_config(
    State(app_context): State<AppContext<HashMapGamesStorage>>,
) -> Response {
    match app_context.access_token {
        Some(access_token) => (
            [(header::CACHE_CONTROL, "private, max-age=300")],
            Json(ViewerConfigResponse {
                error: false,
                error_code: None,
                access_token: Some(access_token),
            }),
        )
            .into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ViewerConfigResponse {
                error: true,
                error_code: Some(ImageryErrorCode::TokenNotConfigured),
                access_token: None,
            }),
        )
            .into_response(),
    }
}

fn nearest_image_error(
    status: StatusCode,
    error_code: ImageryErrorCode,
) -> (StatusCode, Json<NearestImageResponse>) {
    (
        status,
        Json(NearestImageResponse {
            error: true,
            error_code: Some(error_code),
            image_id: None,
        }),
    )
}
