use crate::geo::models::LatLng;
use crate::warn_if_env_var_is_missing;
use async_trait::async_trait;
use env::MAPILLARY_TOKEN;
use errors::ImageryError;

pub mod env;
pub mod errors;
pub mod handlers;
pub mod mapillary;
pub mod rate_limit;
pub mod responses;

/// Resolves a coordinate into the id of the closest panorama the provider has.
#[async_trait]
pub trait ImageryLookup: Send + Sync {
    /// `Ok(None)` when the provider has no coverage around `point`.
    async fn lookup_nearest(&self, point: LatLng) -> Result<Option<String>, ImageryError>;
}

/// Reads the provider token from the environment.
pub fn access_token() -> Option<String> {
    warn_if_env_var_is_missing!(
        MAPILLARY_TOKEN,
        "Imagery lookups and the viewer config endpoint won't work."
    );
    std::env::var(MAPILLARY_TOKEN)
        .ok()
        .filter(|token| !token.trim().is_empty())
}
