use crate::app_context::AppContext;
use crate::imagery::rate_limit::RateLimitDecision;
use crate::imagery::responses::{GuardRejectionResponse, ImageryErrorCode};
use crate::storage::games::HashMapGamesStorage;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use std::time::Instant;

pub const UNKNOWN_CLIENT: &str = "unknown";

/// First `X-Forwarded-For` entry, then `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap) -> String {
    let forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };
    forwarded_for
        .or_else(real_ip)
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

pub async fn tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = client_ip(request.headers());

    let start_time = Instant::now();
    let response = next.run(request).await;
    let elapsed_time = start_time.elapsed().as_micros();

    tracing::info!(
        task = "http_request",
        http_method = %method,
        endpoint = %path,
        client_ip = %client_ip,
        status = response.status().as_u16(),
        processing_time_us = elapsed_time as u64,
    );

    response
}

/// Same-origin check and per-client rate limit for the imagery routes.
pub async fn imagery_guard(
    State(app_context): State<AppContext<HashMapGamesStorage>>,
    request: Request,
    next: Next,
) -> Response {
    let guard = &app_context.imagery_guard;
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());
    if !guard.origin_allowed(origin) {
        return (
            StatusCode::FORBIDDEN,
            Json(GuardRejectionResponse {
                error: true,
                error_code: ImageryErrorCode::Forbidden,
            }),
        )
            .into_response();
    }

    let decision = guard.check(&client_ip(request.headers())).await;
    if !decision.allowed {
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(GuardRejectionResponse {
                error: true,
                error_code: ImageryErrorCode::TooManyRequests,
            }),
        )
            .into_response();
        let headers = response.headers_mut();
        insert_rate_limit_headers(headers, decision);
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("private, max-age=0, must-revalidate"),
        );
        return response;
    }

    let mut response = next.run(request).await;
    insert_rate_limit_headers(response.headers_mut(), decision);
    response
}

fn insert_rate_limit_headers(headers: &mut HeaderMap, decision: RateLimitDecision) {
    let reset_secs = decision.reset_after.as_secs_f64().ceil() as u64;
    headers.insert("ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert("ratelimit-reset", HeaderValue::from(reset_secs));
}
