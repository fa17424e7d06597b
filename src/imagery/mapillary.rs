use crate::geo::models::LatLng;
use crate::imagery::errors::ImageryError;
use crate::imagery::ImageryLookup;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

#[derive(Clone, Debug)]
pub struct MapillaryClient {
    http_client: Client,
    base_url: Url,
    access_token: Option<String>,
}

/// Bounds in degrees, in the provider's `min_lng,min_lat,max_lng,max_lat` order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ImageFeature {
    pub id: String,
    pub computed_geometry: Option<PointGeometry>,
}

impl ImageFeature {
    pub fn position(&self) -> Option<LatLng> {
        let [lng, lat] = self.computed_geometry.as_ref()?.coordinates;
        Some(LatLng::new(lat, lng))
    }
}

/// GeoJSON point, longitude first.
#[derive(Clone, Debug, Deserialize)]
pub struct PointGeometry {
    pub coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct ImagesPage<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ImageId {
    id: String,
}

impl MapillaryClient {
    pub fn new(http_client: Client, base_url: Url, access_token: Option<String>) -> Self {
        Self {
            http_client,
            base_url,
            access_token,
        }
    }

    pub async fn images_in_bbox(
        &self,
        bbox: BoundingBox,
        limit: usize,
    ) -> Result<Vec<ImageFeature>, ImageryError> {
        let bbox = format!(
            "{},{},{},{}",
            bbox.min_lng, bbox.min_lat, bbox.max_lng, bbox.max_lat
        );
        let page: ImagesPage<ImageFeature> = self
            .images(&[
                ("fields", "id,computed_geometry"),
                ("limit", limit.to_string().as_str()),
                ("bbox", bbox.as_str()),
            ])
            .await?;
        Ok(page.data)
    }

    async fn images<T>(&self, params: &[(&str, &str)]) -> Result<ImagesPage<T>, ImageryError>
    where
        T: DeserializeOwned,
    {
        let access_token = self
            .access_token
            .as_deref()
            .ok_or(ImageryError::Configuration)?;
        let url = self
            .base_url
            .join("images")
            .map_err(|err| ImageryError::Network(err.to_string()))?;
        let response = self
            .http_client
            .get(url)
            .query(params)
            .query(&[("access_token", access_token)])
            .send()
            .await?;
        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => Err(ImageryError::TooManyRequests),
            status if !status.is_success() => Err(ImageryError::Upstream {
                status: status.as_u16(),
            }),
            _ => Ok(response.json().await?),
        }
    }
}

#[async_trait]
impl ImageryLookup for MapillaryClient {
    async fn lookup_nearest(&self, point: LatLng) -> Result<Option<String>, ImageryError> {
        // The provider wants longitude first.
        let close_to = format!("{},{}", point.lng, point.lat);
        let page: ImagesPage<ImageId> = self
            .images(&[("fields", "id"), ("limit", "1"), ("closeto", close_to.as_str())])
            .await?;
        Ok(page.data.into_iter().next().map(|image| image.id))
    }
}
