use crate::geo::consts::DISTANCE_PLACEHOLDER;

pub fn format_distance(meters: Option<f64>) -> String {
    let meters = match meters {
        Some(meters) if meters.is_finite() && meters >= 0.0 => meters,
        _ => return DISTANCE_PLACEHOLDER.to_string(),
    };
    if meters < 1000.0 {
        format!("{:.0} m", meters.round())
    } else if meters < 10_000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

pub fn format_coordinate(lat: f64, lng: f64) -> String {
    let lat_hemisphere = if lat >= 0.0 { 'N' } else { 'S' };
    let lng_hemisphere = if lng >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}° {}, {:.4}° {}",
        lat.abs(),
        lat_hemisphere,
        lng.abs(),
        lng_hemisphere,
    )
}
