use crate::catalog::loader::CatalogSource;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;
#[cfg(test)]
pub mod tests;

#[derive(Debug, Parser)]
#[command(version, about = "GeoGPT game server and catalog authoring tools.")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the game over HTTP.
    Serve(ServeArgs),
    /// Turn a list of street-level imagery URLs into a location catalog.
    UrlsToLocations(UrlsToLocationsArgs),
    /// Sample imagery around a fixed set of world cities into a location catalog.
    FetchCityLocations(FetchCityLocationsArgs),
}

#[derive(Clone, Debug, clap::Args)]
pub struct ServeArgs {
    /// Ships structured logs to Quickwit when set.
    #[arg(long)]
    pub quickwit_url: Option<Url>,
    #[arg(long)]
    #[arg(default_value = "0.0.0.0:3030")]
    pub listen_address: SocketAddr,
    /// Primary catalog: a file path or an http(s) URL.
    #[arg(long)]
    #[arg(default_value = "data/locations.json")]
    pub locations: CatalogSource,
    /// Used when the primary catalog can't be read.
    #[arg(long)]
    #[arg(default_value = "data/locations.example.json")]
    pub fallback_locations: Option<CatalogSource>,
    #[arg(long, value_delimiter = ',')]
    #[arg(default_value = "http://127.0.0.1:3000,http://localhost:3000")]
    pub cors_origins: Vec<String>,
    /// Only this `Origin` may call the imagery routes. Any origin is accepted when unset.
    #[arg(long)]
    pub allowed_origin: Option<String>,
    #[arg(long)]
    #[arg(default_value_t = 30)]
    pub imagery_rate_limit: usize,
    #[arg(long)]
    #[arg(default_value_t = 60)]
    pub imagery_rate_window_secs: u64,
    #[arg(long)]
    #[arg(default_value_t = 200)]
    pub backfill_delay_ms: u64,
    /// Games with no action for this long are dropped.
    #[arg(long)]
    #[arg(default_value_t = 3600)]
    pub game_idle_timeout_secs: u64,
    #[arg(long)]
    #[arg(default_value = "https://graph.mapillary.com/")]
    pub mapillary_url: Url,
}

#[derive(Clone, Debug, clap::Args)]
pub struct UrlsToLocationsArgs {
    /// Text file with one imagery URL per line.
    pub input: PathBuf,
    #[arg(long)]
    #[arg(default_value = "data/locations.json")]
    pub output: PathBuf,
}

#[derive(Clone, Debug, clap::Args)]
pub struct FetchCityLocationsArgs {
    #[arg(long)]
    #[arg(default_value = "data/locations.json")]
    pub output: PathBuf,
    #[arg(long)]
    #[arg(default_value_t = 50)]
    pub target: usize,
    #[arg(long)]
    #[arg(default_value_t = 200)]
    pub delay_ms: u64,
    #[arg(long)]
    #[arg(default_value = "https://graph.mapillary.com/")]
    pub mapillary_url: Url,
}
