use crate::authoring::cities::{City, CITIES};
use crate::authoring::AuthoringError;
use crate::catalog::models::RoundDefinition;
use crate::geo::destination_point;
use crate::geo::models::LatLng;
use crate::imagery::errors::ImageryError;
use crate::imagery::mapillary::{BoundingBox, ImageFeature, MapillaryClient};
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashSet;
use std::time::Duration;

const FIRST_PASS_BOX_DEGREES: f64 = 0.05;
const FIRST_PASS_LIMIT: usize = 5;
const FIRST_PASS_PER_CITY: usize = 2;
const SECOND_PASS_CITIES: usize = 10;
const SECOND_PASS_ATTEMPTS: usize = 3;
const SECOND_PASS_BOX_DEGREES: f64 = 0.03;
const SECOND_PASS_LIMIT: usize = 10;
const OPPONENT_MIN_KM: f64 = 100.0;
const OPPONENT_MAX_KM: f64 = 2000.0;

#[async_trait]
pub trait ImageSearch: Send + Sync {
    async fn images_in_bbox(
        &self,
        bbox: BoundingBox,
        limit: usize,
    ) -> Result<Vec<ImageFeature>, ImageryError>;
}

#[async_trait]
impl ImageSearch for MapillaryClient {
    async fn images_in_bbox(
        &self,
        bbox: BoundingBox,
        limit: usize,
    ) -> Result<Vec<ImageFeature>, ImageryError> {
        MapillaryClient::images_in_bbox(self, bbox, limit).await
    }
}

/// A `size`-degree square placed uniformly at random inside `bounds`.
pub fn random_sub_box(bounds: &BoundingBox, size: f64, rng: &mut impl Rng) -> BoundingBox {
    let slack_lng = (bounds.max_lng - bounds.min_lng - size).max(0.0);
    let slack_lat = (bounds.max_lat - bounds.min_lat - size).max(0.0);
    let min_lng = bounds.min_lng + rng.gen::<f64>() * slack_lng;
    let min_lat = bounds.min_lat + rng.gen::<f64>() * slack_lat;
    BoundingBox {
        min_lng,
        min_lat,
        max_lng: min_lng + size,
        max_lat: min_lat + size,
    }
}

/// A plausible wrong guess, 100 to 2000 km away from `answer` in a random direction.
pub fn opponent_guess_near(answer: LatLng, rng: &mut impl Rng) -> LatLng {
    let distance_km = rng.gen_range(OPPONENT_MIN_KM..OPPONENT_MAX_KM);
    let bearing = rng.gen_range(0.0..360.0);
    destination_point(answer, distance_km * 1000.0, bearing)
}

struct Sampler<'a, S: ImageSearch + ?Sized> {
    provider: &'a S,
    target: usize,
    delay: Duration,
    seen: HashSet<String>,
    rounds: Vec<RoundDefinition>,
}

impl<S: ImageSearch + ?Sized> Sampler<'_, S> {
    fn is_full(&self) -> bool {
        self.rounds.len() >= self.target
    }

    async fn search(
        &self,
        city: &City,
        box_degrees: f64,
        limit: usize,
    ) -> Result<Vec<ImageFeature>, AuthoringError> {
        let bbox = random_sub_box(&city.bounds, box_degrees, &mut rand::thread_rng());
        match self.provider.images_in_bbox(bbox, limit).await {
            Ok(images) => Ok(images),
            Err(ImageryError::Configuration) => Err(ImageryError::Configuration.into()),
            Err(err) => {
                tracing::warn!("Search in {} failed: {err}", city.name);
                Ok(Vec::new())
            }
        }
    }

    /// Adds up to `cap` unseen images. Images without a position are skipped.
    fn keep(&mut self, city: &City, images: Vec<ImageFeature>, cap: usize) {
        let mut added = 0;
        for image in images {
            if added >= cap || self.is_full() {
                break;
            }
            let Some(answer) = image.position() else {
                continue;
            };
            if !self.seen.insert(image.id.clone()) {
                continue;
            }
            let opponent_guess = opponent_guess_near(answer, &mut rand::thread_rng());
            self.rounds.push(RoundDefinition {
                id: format!("{}_{}", city.slug(), self.rounds.len() + 1),
                title: Some(city.name.to_string()),
                imagery_ref: image.id,
                answer,
                opponent_guess,
            });
            added += 1;
            tracing::info!("Found image {}/{}.", self.rounds.len(), self.target);
        }
    }
}

/// Builds up to `target` rounds from imagery found around well-covered cities.
pub async fn sample_cities<S: ImageSearch + ?Sized>(
    provider: &S,
    target: usize,
    delay: Duration,
) -> Result<Vec<RoundDefinition>, AuthoringError> {
    let mut sampler = Sampler {
        provider,
        target,
        delay,
        seen: HashSet::new(),
        rounds: Vec::new(),
    };

    for city in CITIES.iter() {
        if sampler.is_full() {
            break;
        }
        tracing::info!("Searching in {}...", city.name);
        let images = sampler
            .search(city, FIRST_PASS_BOX_DEGREES, FIRST_PASS_LIMIT)
            .await?;
        sampler.keep(city, images, FIRST_PASS_PER_CITY);
        tokio::time::sleep(sampler.delay).await;
    }

    for city in CITIES.iter().take(SECOND_PASS_CITIES) {
        for _ in 0..SECOND_PASS_ATTEMPTS {
            if sampler.is_full() {
                return Ok(sampler.rounds);
            }
            tracing::info!("Searching again in {}...", city.name);
            let images = sampler
                .search(city, SECOND_PASS_BOX_DEGREES, SECOND_PASS_LIMIT)
                .await?;
            sampler.keep(city, images, usize::MAX);
            tokio::time::sleep(sampler.delay).await;
        }
    }

    Ok(sampler.rounds)
}
