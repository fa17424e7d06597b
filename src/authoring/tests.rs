use crate::authoring::cities::CITIES;
use crate::authoring::sampling::{
    opponent_guess_near, random_sub_box, sample_cities, ImageSearch,
};
use crate::authoring::urls::{parse_provider_url, urls_to_catalog, ProviderLink};
use crate::authoring::{write_catalog, AuthoringError};
use crate::catalog::loader::parse;
use crate::geo::distance_meters;
use crate::geo::models::LatLng;
use crate::imagery::errors::ImageryError;
use crate::imagery::mapillary::{BoundingBox, ImageFeature, PointGeometry};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[test]
fn test_image_id_from_query_parameter() {
    let link = parse_provider_url(
        "https://www.mapillary.com/app/?lat=48.85&lng=2.29&z=17&focus=photo&pKey=123456789",
    )
    .expect("URL should parse.");

    assert_eq!(
        link,
        ProviderLink {
            image_id: Some(String::from("123456789")),
            lat: Some(48.85),
            lng: Some(2.29),
        }
    );
}

#[test]
fn test_image_id_fallbacks() {
    let photo_id = parse_provider_url("https://www.mapillary.com/app/?photoId=abc").unwrap();
    assert_eq!(photo_id.image_id.as_deref(), Some("abc"));

    let from_path = parse_provider_url("@https://www.mapillary.com/map/im/987_x-Y").unwrap();
    assert_eq!(from_path.image_id.as_deref(), Some("987_x-Y"));
    assert_eq!(from_path.lat, None);

    let single_segment = parse_provider_url("https://www.mapillary.com/987").unwrap();
    assert_eq!(single_segment.image_id, None);
}

#[test]
fn test_blank_comment_and_garbage_lines_are_skipped() {
    assert!(parse_provider_url("").is_none());
    assert!(parse_provider_url("   ").is_none());
    assert!(parse_provider_url("# https://www.mapillary.com/app/?pKey=1").is_none());
    assert!(parse_provider_url("not a url").is_none());
}

#[test]
fn test_urls_to_catalog() {
    let input = "\
# my favourite places
https://www.mapillary.com/app/?lat=10.5&lng=20.25&pKey=111

https://www.mapillary.com/app/?focus=map
";
    let rounds = urls_to_catalog(input).expect("Catalog should be built.");

    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0].id, "custom_1");
    assert_eq!(rounds[0].imagery_ref, "111");
    assert_eq!(rounds[0].answer, LatLng::new(10.5, 20.25));
    assert_eq!(rounds[0].opponent_guess, rounds[0].answer);
    assert_eq!(rounds[0].title.as_deref(), Some(""));
    assert_eq!(rounds[1].id, "custom_2");
    assert_eq!(rounds[1].imagery_ref, "");
    assert_eq!(rounds[1].answer, LatLng::new(0.0, 0.0));
}

#[test]
fn test_urls_to_catalog_without_urls() {
    let result = urls_to_catalog("# nothing here\n\n");
    assert!(matches!(result, Err(AuthoringError::NoValidUrls)));
}

#[tokio::test]
async fn test_written_catalog_loads_back() {
    let rounds = urls_to_catalog("https://www.mapillary.com/app/?lat=1&lng=2&pKey=42").unwrap();
    let path = std::env::temp_dir()
        .join(format!("geogpt-authoring-{}", std::process::id()))
        .join("locations.json");

    write_catalog(&path, rounds.clone())
        .await
        .expect("Catalog should be written.");
    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    let _ = tokio::fs::remove_file(&path).await;

    assert!(raw.starts_with("{\n"));
    assert_eq!(parse(&raw, false).unwrap(), rounds);
}

#[test]
fn test_random_sub_box_stays_inside_bounds() {
    let bounds = CITIES[4].bounds;
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let sub_box = random_sub_box(&bounds, 0.05, &mut rng);
        assert!(sub_box.min_lng >= bounds.min_lng);
        assert!(sub_box.min_lat >= bounds.min_lat);
        assert!(sub_box.max_lng <= bounds.max_lng + 1e-9);
        assert!(sub_box.max_lat <= bounds.max_lat + 1e-9);
        assert!((sub_box.max_lng - sub_box.min_lng - 0.05).abs() < 1e-9);
    }
}

#[test]
fn test_opponent_guess_distance() {
    let answer = LatLng::new(48.8566, 2.3522);
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let guess = opponent_guess_near(answer, &mut rng);
        let distance_km = distance_meters(answer, guess) / 1000.0;
        assert!(guess.is_valid());
        assert!((99.0..=2001.0).contains(&distance_km), "{distance_km}");
    }
}

#[test]
fn test_city_slugs() {
    assert_eq!(CITIES.len(), 25);
    assert_eq!(CITIES[0].slug(), "new_york");
    assert_eq!(CITIES[22].slug(), "mexico_city");
}

/// Hands out `per_call` fresh images centered in every searched box.
struct FakeImageSearch {
    per_call: usize,
    calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl FakeImageSearch {
    fn new(per_call: usize) -> Self {
        Self {
            per_call,
            calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ImageSearch for FakeImageSearch {
    async fn images_in_bbox(
        &self,
        bbox: BoundingBox,
        limit: usize,
    ) -> Result<Vec<ImageFeature>, ImageryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let center = [
            (bbox.min_lng + bbox.max_lng) / 2.0,
            (bbox.min_lat + bbox.max_lat) / 2.0,
        ];
        Ok((0..self.per_call.min(limit))
            .map(|_| ImageFeature {
                id: self.next_id.fetch_add(1, Ordering::SeqCst).to_string(),
                computed_geometry: Some(PointGeometry {
                    coordinates: center,
                }),
            })
            .collect())
    }
}

#[tokio::test]
async fn test_sampling_takes_two_per_city_and_stops_at_target() {
    let search = FakeImageSearch::new(5);

    let rounds = sample_cities(&search, 10, Duration::ZERO).await.unwrap();

    assert_eq!(rounds.len(), 10);
    assert_eq!(search.calls.load(Ordering::SeqCst), 5);
    assert_eq!(rounds[0].id, "new_york_1");
    assert_eq!(rounds[1].id, "new_york_2");
    assert_eq!(rounds[2].id, "los_angeles_3");
    assert_eq!(rounds[2].title.as_deref(), Some("Los Angeles"));
    for round in &rounds {
        let distance_km = distance_meters(round.answer, round.opponent_guess) / 1000.0;
        assert!((99.0..=2001.0).contains(&distance_km));
    }
}

#[tokio::test]
async fn test_sampling_second_pass_fills_up() {
    let search = FakeImageSearch::new(1);

    let rounds = sample_cities(&search, 30, Duration::ZERO).await.unwrap();

    // 25 from the first pass, 5 more from the first two cities of the second.
    assert_eq!(rounds.len(), 30);
    assert_eq!(search.calls.load(Ordering::SeqCst), 30);
    assert_eq!(rounds[25].id, "new_york_26");
}

struct UnconfiguredSearch;

#[async_trait]
impl ImageSearch for UnconfiguredSearch {
    async fn images_in_bbox(
        &self,
        _bbox: BoundingBox,
        _limit: usize,
    ) -> Result<Vec<ImageFeature>, ImageryError> {
        Err(ImageryError::Configuration)
    }
}

#[tokio::test]
async fn test_sampling_without_token_fails() {
    let result = sample_cities(&UnconfiguredSearch, 10, Duration::ZERO).await;
    assert!(matches!(
        result,
        Err(AuthoringError::Imagery(ImageryError::Configuration))
    ));
}
