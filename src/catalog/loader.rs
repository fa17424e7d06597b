use crate::catalog::errors::CatalogError;
use crate::catalog::models::{CatalogFile, RoundDefinition};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

/// Where a catalog dataset lives.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogSource {
    File(PathBuf),
    Remote(Url),
}

impl CatalogSource {
    fn is_ndjson(&self) -> bool {
        match self {
            Self::File(path) => path.extension().is_some_and(|ext| ext == "ndjson"),
            Self::Remote(url) => url.path().ends_with(".ndjson"),
        }
    }
}

impl FromStr for CatalogSource {
    type Err = url::ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(Self::Remote(Url::parse(raw)?))
        } else {
            Ok(Self::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CatalogSources {
    pub primary: CatalogSource,
    pub fallback: Option<CatalogSource>,
}

/// Loads the primary dataset, then the fallback one if the primary is unavailable or
/// malformed. Never fails: with both sources gone the catalog is simply empty.
pub async fn load(sources: &CatalogSources, http_client: &Client) -> Vec<RoundDefinition> {
    match fetch(&sources.primary, http_client).await {
        Ok(rounds) => {
            tracing::info!(
                "Loaded {} round(s) from `{}`.",
                rounds.len(),
                sources.primary
            );
            return rounds;
        }
        Err(err) => tracing::warn!("Primary catalog unavailable: {err}"),
    }
    let Some(fallback) = &sources.fallback else {
        tracing::warn!("No fallback catalog configured, starting with an empty catalog.");
        return Vec::new();
    };
    match fetch(fallback, http_client).await {
        Ok(rounds) => {
            tracing::info!("Loaded {} round(s) from fallback `{fallback}`.", rounds.len());
            rounds
        }
        Err(err) => {
            tracing::warn!("Fallback catalog unavailable, starting with an empty catalog: {err}");
            Vec::new()
        }
    }
}

pub async fn fetch(
    source: &CatalogSource,
    http_client: &Client,
) -> Result<Vec<RoundDefinition>, CatalogError> {
    let source_name = source.to_string();
    let raw = match source {
        CatalogSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|err| CatalogError::Unavailable {
                    source_name: source_name.clone(),
                    reason: err.to_string(),
                })?
        }
        CatalogSource::Remote(url) => {
            let unavailable = |err: reqwest::Error| CatalogError::Unavailable {
                source_name: source_name.clone(),
                reason: err.to_string(),
            };
            let response = http_client
                .get(url.clone())
                .send()
                .await
                .map_err(unavailable)?;
            if !response.status().is_success() {
                return Err(CatalogError::UpstreamStatus {
                    source_name: source_name.clone(),
                    status: response.status().as_u16(),
                });
            }
            response.text().await.map_err(unavailable)?
        }
    };
    parse(&raw, source.is_ndjson()).map_err(|err| CatalogError::Malformed {
        source_name,
        reason: err.to_string(),
    })
}

pub fn parse(raw: &str, ndjson: bool) -> Result<Vec<RoundDefinition>, serde_json::Error> {
    if !ndjson {
        let file: CatalogFile = serde_json::from_str(raw)?;
        return Ok(file.locations);
    }
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}
