use crate::imagery::mapillary::BoundingBox;

pub struct City {
    pub name: &'static str,
    pub bounds: BoundingBox,
}

const fn city(name: &'static str, min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> City {
    City {
        name,
        bounds: BoundingBox {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        },
    }
}

/// Cities with dense street-level coverage, roughly by population. The second sampling pass
/// only revisits the first few.
pub static CITIES: [City; 25] = [
    city("New York", -74.25, 40.50, -73.70, 40.91),
    city("Los Angeles", -118.67, 33.70, -118.15, 34.34),
    city("Chicago", -87.94, 41.64, -87.52, 42.02),
    city("London", -0.51, 51.28, 0.33, 51.69),
    city("Paris", 2.22, 48.81, 2.47, 48.90),
    city("Berlin", 13.08, 52.34, 13.76, 52.68),
    city("Amsterdam", 4.73, 52.28, 5.08, 52.43),
    city("Barcelona", 2.05, 41.32, 2.23, 41.47),
    city("Rome", 12.35, 41.80, 12.65, 42.01),
    city("Tokyo", 139.56, 35.53, 139.92, 35.82),
    city("Sydney", 151.00, -33.98, 151.31, -33.71),
    city("San Francisco", -122.52, 37.71, -122.35, 37.81),
    city("Toronto", -79.64, 43.58, -79.12, 43.86),
    city("Singapore", 103.60, 1.21, 104.03, 1.47),
    city("Dubai", 55.13, 25.07, 55.41, 25.35),
    city("Moscow", 37.32, 55.57, 37.97, 55.92),
    city("Stockholm", 17.91, 59.20, 18.19, 59.43),
    city("Copenhagen", 12.45, 55.62, 12.65, 55.73),
    city("Melbourne", 144.81, -37.93, 145.06, -37.70),
    city("Seoul", 126.76, 37.43, 127.18, 37.71),
    city("Bangkok", 100.32, 13.49, 100.93, 13.95),
    city("Buenos Aires", -58.53, -34.71, -58.34, -34.53),
    city("Mexico City", -99.36, 19.05, -98.94, 19.59),
    city("Istanbul", 28.63, 40.80, 29.46, 41.32),
    city("Vienna", 16.18, 48.12, 16.58, 48.32),
];

impl City {
    /// `paris`, `new_york`...
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "_")
    }
}
