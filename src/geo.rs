// Great-circle distance helpers

use crate::constants::EARTH_RADIUS_METERS;

/// Haversine distance between two coordinates, in meters.
///
/// Spherical-Earth approximation. The claim geofence threshold is calibrated
/// against this exact formula, so it must not be swapped for an ellipsoidal
/// variant.
pub fn distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = deg2rad(lat2 - lat1);
    let d_lng = deg2rad(lng2 - lng1);
    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + deg2rad(lat1).cos() * deg2rad(lat2).cos() * (d_lng / 2.0).sin() * (d_lng / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}

fn deg2rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}
