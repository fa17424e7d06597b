use consts::EARTH_RADIUS;
use models::LatLng;

pub mod consts;
pub mod format;
pub mod models;

/// Great-circle (haversine) distance in meters.
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    let phi_1 = a.lat.to_radians();
    let phi_2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();
    let h = (delta_phi / 2.0).sin().powi(2)
        + phi_1.cos() * phi_2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1 for near-antipodal points.
    2.0 * EARTH_RADIUS * h.sqrt().clamp(0.0, 1.0).asin()
}

/// Point reached by travelling `distance_m` from `origin` along the initial `bearing_deg`
/// (clockwise from north).
pub fn destination_point(origin: LatLng, distance_m: f64, bearing_deg: f64) -> LatLng {
    let angular_distance = distance_m / EARTH_RADIUS;
    let bearing = bearing_deg.to_radians();
    let phi_1 = origin.lat.to_radians();
    let lambda_1 = origin.lng.to_radians();
    let phi_2 = (phi_1.sin() * angular_distance.cos()
        + phi_1.cos() * angular_distance.sin() * bearing.cos())
    .asin();
    let lambda_2 = lambda_1
        + (bearing.sin() * angular_distance.sin() * phi_1.cos())
            .atan2(angular_distance.cos() - phi_1.sin() * phi_2.sin());
    let destination = LatLng::new(phi_2.to_degrees(), lambda_2.to_degrees());
    destination.normalized().unwrap_or(destination)
}
