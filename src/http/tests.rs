use crate::app_context::AppContext;
use crate::catalog::backfill::BackfillHandle;
use crate::catalog::loader::CatalogSources;
use crate::catalog::models::RoundDefinition;
use crate::catalog::store::CatalogStore;
use crate::cli::tests::fake_args;
use crate::cli::ServeArgs;
use crate::game::tests::three_rounds;
use crate::http::middleware::client_ip;
use crate::http::router;
use crate::imagery::rate_limit::ImageryGuard;
use crate::imagery::tests::FakeImageryLookup;
use crate::imagery::ImageryLookup;
use crate::storage::games::HashMapGamesStorage;
use axum::http::{HeaderMap, HeaderValue};
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_ACCESS_TOKEN: &str = "test-access-token";

pub fn test_app_context(
    args: &ServeArgs,
    rounds: Vec<RoundDefinition>,
    imagery: Arc<dyn ImageryLookup>,
    access_token: Option<&str>,
) -> AppContext<HashMapGamesStorage> {
    AppContext {
        games: HashMapGamesStorage::new(Duration::from_secs(args.game_idle_timeout_secs)),
        catalog: CatalogStore::new(rounds),
        catalog_sources: CatalogSources {
            primary: args.locations.clone(),
            fallback: args.fallback_locations.clone(),
        },
        backfill: BackfillHandle::new(Duration::from_millis(args.backfill_delay_ms)),
        imagery,
        imagery_guard: ImageryGuard::new(
            args.allowed_origin.clone(),
            args.imagery_rate_limit,
            Duration::from_secs(args.imagery_rate_window_secs),
        ),
        access_token: access_token.map(str::to_string),
        http_client: reqwest::Client::new(),
    }
}

pub fn test_server_with(args: &ServeArgs, app_context: AppContext<HashMapGamesStorage>) -> TestServer {
    let router = router::new(args, app_context);
    TestServer::new(router).expect("Failed to run test server.")
}

pub fn test_server() -> TestServer {
    let args = fake_args();
    let app_context = test_app_context(
        &args,
        three_rounds(),
        Arc::new(FakeImageryLookup::always(Ok(None))),
        Some(TEST_ACCESS_TOKEN),
    );
    test_server_with(&args, app_context)
}

#[test]
fn test_client_ip_prefers_forwarded_for() {
    let mut headers = HeaderMap::new();
    headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
    headers.insert(
        "x-forwarded-for",
        HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1"),
    );

    assert_eq!(client_ip(&headers), "203.0.113.7");
}

#[test]
fn test_client_ip_fallbacks() {
    let mut headers = HeaderMap::new();
    assert_eq!(client_ip(&headers), "unknown");

    headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
    assert_eq!(client_ip(&headers), "10.0.0.2");

    headers.insert("x-forwarded-for", HeaderValue::from_static(""));
    assert_eq!(client_ip(&headers), "10.0.0.2");
}

#[tokio::test]
async fn test_cors_preflight() {
    let server = test_server();

    let response = server
        .method(axum::http::Method::OPTIONS, "/games")
        .add_header(
            axum::http::header::ORIGIN,
            HeaderValue::from_static("http://localhost:3000"),
        )
        .add_header(
            axum::http::header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .await;

    assert_eq!(
        response.header(axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "http://localhost:3000"
    );
}
