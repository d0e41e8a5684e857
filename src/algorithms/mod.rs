//! Geodesic algorithms

pub mod geomath;

pub use geomath::{
    degrees_to_radians, radians_to_degrees, distance_meters, distance_meters_with_radius,
    initial_bearing_degrees, checked_distance_meters, checked_initial_bearing_degrees
};
