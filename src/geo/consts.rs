/// Mean Earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;
pub const DISTANCE_PLACEHOLDER: &str = "—";
