use crate::catalog::loader::CatalogSource;
use crate::cli::{Args, Command, ServeArgs};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

pub fn fake_args() -> ServeArgs {
    ServeArgs {
        quickwit_url: None,
        listen_address: SocketAddr::from_str("0.0.0.0:3030")
            .expect("Failed to construct fake listen address."),
        locations: CatalogSource::File(PathBuf::from("data/locations.json")),
        fallback_locations: None,
        cors_origins: vec![String::from("http://localhost:3000")],
        allowed_origin: None,
        imagery_rate_limit: 30,
        imagery_rate_window_secs: 60,
        backfill_delay_ms: 0,
        game_idle_timeout_secs: 3600,
        mapillary_url: Url::from_str("https://graph.mapillary.com/")
            .expect("Failed to construct fake Mapillary URL."),
    }
}

#[test]
fn test_serve_defaults() {
    let args = Args::try_parse_from(["geogpt-server", "serve"]).expect("Failed to parse args.");

    let Command::Serve(serve) = args.command else {
        panic!("Expected the `serve` subcommand.");
    };
    assert_eq!(serve.listen_address.port(), 3030);
    assert_eq!(
        serve.locations,
        CatalogSource::File(PathBuf::from("data/locations.json"))
    );
    assert_eq!(
        serve.fallback_locations,
        Some(CatalogSource::File(PathBuf::from(
            "data/locations.example.json"
        )))
    );
    assert_eq!(serve.cors_origins.len(), 2);
    assert_eq!(serve.imagery_rate_limit, 30);
    assert_eq!(serve.imagery_rate_window_secs, 60);
    assert_eq!(serve.game_idle_timeout_secs, 3600);
    assert!(serve.quickwit_url.is_none());
}

#[test]
fn test_remote_catalog_source() {
    let args = Args::try_parse_from([
        "geogpt-server",
        "serve",
        "--locations",
        "https://example.com/locations.json",
    ])
    .expect("Failed to parse args.");

    let Command::Serve(serve) = args.command else {
        panic!("Expected the `serve` subcommand.");
    };
    assert!(matches!(serve.locations, CatalogSource::Remote(_)));
}

#[test]
fn test_urls_to_locations_requires_input() {
    assert!(Args::try_parse_from(["geogpt-server", "urls-to-locations"]).is_err());

    let args = Args::try_parse_from(["geogpt-server", "urls-to-locations", "urls.txt"])
        .expect("Failed to parse args.");
    let Command::UrlsToLocations(urls) = args.command else {
        panic!("Expected the `urls-to-locations` subcommand.");
    };
    assert_eq!(urls.input, PathBuf::from("urls.txt"));
    assert_eq!(urls.output, PathBuf::from("data/locations.json"));
}
