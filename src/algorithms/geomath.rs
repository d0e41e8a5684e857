//! Great-circle distance and initial bearing between decimal-degree coordinates
//!
//! All functions are pure. The unchecked variants follow the formulas
//! literally and propagate NaN for non-finite input; the `checked_*` variants
//! reject such input before any trigonometry runs.

use crate::core::{Coordinate, EARTH_RADIUS_KM, METERS_PER_KM};
use crate::validation::data::ensure_finite;
use crate::validation::error::GeoResult;
use std::f64::consts::PI;

pub fn degrees_to_radians(value: f64) -> f64 {
    value * PI / 180.0
}

pub fn radians_to_degrees(value: f64) -> f64 {
    value * 180.0 / PI
}

/// Haversine distance in metres on a sphere of radius `EARTH_RADIUS_KM`
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    distance_meters_with_radius(a, b, EARTH_RADIUS_KM)
}

/// Haversine distance in metres on a sphere of the given radius (km)
pub fn distance_meters_with_radius(a: Coordinate, b: Coordinate, radius_km: f64) -> f64 {
    let d_lat = degrees_to_radians(a.latitude - b.latitude);
    let d_lon = degrees_to_radians(a.longitude - b.longitude);
    let lat_a = degrees_to_radians(a.latitude);
    let lat_b = degrees_to_radians(b.latitude);

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    let h = half_lat * half_lat + half_lon * half_lon * lat_a.cos() * lat_b.cos();
    // Rounding can push h a hair past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    radius_km * c * METERS_PER_KM
}

/// Forward azimuth from `from` to `to`, degrees in [0, 360)
///
/// Identical points give atan2(0, 0) = 0, so the bearing is 0 there.
pub fn initial_bearing_degrees(from: Coordinate, to: Coordinate) -> f64 {
    let d_lon = degrees_to_radians(to.longitude - from.longitude);
    let lat_from = degrees_to_radians(from.latitude);
    let lat_to = degrees_to_radians(to.latitude);

    let x = lat_to.cos() * d_lon.sin();
    let y = lat_from.cos() * lat_to.sin() - lat_from.sin() * lat_to.cos() * d_lon.cos();

    let bearing = x.atan2(y);

    normalize_degrees(radians_to_degrees(bearing))
}

/// Maps a finite angle into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = (degrees + 360.0) % 360.0;
    if normalized < 0.0 {
        normalized + 360.0
    } else {
        normalized
    }
}

/// `distance_meters` with non-finite input rejected
pub fn checked_distance_meters(a: Coordinate, b: Coordinate) -> GeoResult<f64> {
    checked_distance_meters_with_radius(a, b, EARTH_RADIUS_KM)
}

pub fn checked_distance_meters_with_radius(
    a: Coordinate,
    b: Coordinate,
    radius_km: f64,
) -> GeoResult<f64> {
    ensure_finite(&a)?;
    ensure_finite(&b)?;
    Ok(distance_meters_with_radius(a, b, radius_km))
}

/// `initial_bearing_degrees` with non-finite input rejected
pub fn checked_initial_bearing_degrees(from: Coordinate, to: Coordinate) -> GeoResult<f64> {
    ensure_finite(&from)?;
    ensure_finite(&to)?;
    Ok(initial_bearing_degrees(from, to))
}
