use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Wraps the longitude into `[-180, 180]`. Map widgets that let the world repeat
    /// horizontally report clicks far outside that range.
    ///
    /// Returns `None` for non-finite components or a latitude outside `[-90, 90]`.
    pub fn normalized(&self) -> Option<Self> {
        if !self.lat.is_finite() || !self.lng.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return None;
        }
        if (-180.0..=180.0).contains(&self.lng) {
            return Some(*self);
        }
        let lng = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        Some(Self { lat: self.lat, lng })
    }
}
