use crate::app_context::AppContext;
use crate::authoring::sampling::sample_cities;
use crate::authoring::urls::urls_to_catalog;
use crate::authoring::{write_catalog, AuthoringError};
use crate::catalog::backfill::BackfillHandle;
use crate::catalog::loader::CatalogSources;
use crate::catalog::store::CatalogStore;
use crate::cli::{Args, Command, FetchCityLocationsArgs, ServeArgs, UrlsToLocationsArgs};
use crate::imagery::errors::ImageryError;
use crate::imagery::mapillary::MapillaryClient;
use crate::imagery::rate_limit::ImageryGuard;
use crate::storage::games::HashMapGamesStorage;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

mod app_context;
mod authoring;
mod catalog;
mod cli;
mod game;
mod geo;
mod health;
mod http;
mod imagery;
mod logging;
mod storage;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    match args.command {
        Command::Serve(args) => {
            logging::init(args.quickwit_url.as_ref());
            if let Err(err) = serve(args).await {
                tracing::error!("Server failed: {err}");
                std::process::exit(1);
            }
        }
        Command::UrlsToLocations(args) => {
            logging::init(None);
            if let Err(err) = urls_to_locations(args).await {
                tracing::error!("{err}");
                std::process::exit(1);
            }
        }
        Command::FetchCityLocations(args) => {
            logging::init(None);
            if let Err(err) = fetch_city_locations(args).await {
                tracing::error!("{err}");
                std::process::exit(1);
            }
        }
    }
}

async fn serve(args: ServeArgs) -> std::io::Result<()> {
    let http_client = reqwest::Client::new();
    let access_token = imagery::access_token();
    let imagery = MapillaryClient::new(
        http_client.clone(),
        args.mapillary_url.clone(),
        access_token.clone(),
    );
    let catalog_sources = CatalogSources {
        primary: args.locations.clone(),
        fallback: args.fallback_locations.clone(),
    };
    // Nothing is served until the catalog is in.
    let rounds = catalog::loader::load(&catalog_sources, &http_client).await;

    let app_context = AppContext {
        games: HashMapGamesStorage::new(Duration::from_secs(args.game_idle_timeout_secs)),
        catalog: CatalogStore::new(rounds),
        catalog_sources,
        backfill: BackfillHandle::new(Duration::from_millis(args.backfill_delay_ms)),
        imagery: Arc::new(imagery),
        imagery_guard: ImageryGuard::new(
            args.allowed_origin.clone(),
            args.imagery_rate_limit,
            Duration::from_secs(args.imagery_rate_window_secs),
        ),
        access_token,
        http_client,
    };
    let generation = app_context.catalog.generation().await;
    catalog::start_backfill(&app_context, generation).await;

    let router = http::router::new(&args, app_context);
    let listener = tokio::net::TcpListener::bind(args.listen_address).await?;
    tracing::info!("Listening on {}.", args.listen_address);
    axum::serve(listener, router).await
}

async fn urls_to_locations(args: UrlsToLocationsArgs) -> Result<(), AuthoringError> {
    let input = tokio::fs::read_to_string(&args.input)
        .await
        .map_err(|source| AuthoringError::Io {
            path: args.input.clone(),
            source,
        })?;
    let rounds = urls_to_catalog(&input)?;
    let count = rounds.len();
    write_catalog(&args.output, rounds).await?;
    tracing::info!("Wrote {count} location(s) to `{}`.", args.output.display());
    tracing::info!("Edit each entry's title and opponent guess as needed.");
    Ok(())
}

async fn fetch_city_locations(args: FetchCityLocationsArgs) -> Result<(), AuthoringError> {
    let access_token = imagery::access_token().ok_or(ImageryError::Configuration)?;
    let client = MapillaryClient::new(
        reqwest::Client::new(),
        args.mapillary_url,
        Some(access_token),
    );
    let rounds = sample_cities(&client, args.target, Duration::from_millis(args.delay_ms)).await?;
    let count = rounds.len();
    write_catalog(&args.output, rounds).await?;
    tracing::info!("Wrote {count} location(s) to `{}`.", args.output.display());
    Ok(())
}
