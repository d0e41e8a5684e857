//! Target locator
//!
//! Tracks the device's live position and compass heading against a
//! user-entered target, and reports great-circle distance and initial
//! bearing to it on every fix.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod utils;
pub mod platform;
pub mod api;

// Re-export commonly used types
pub use crate::core::{Coordinate, HeadingSample, AxisState, AuthorizationStatus, LocationAccuracy, EARTH_RADIUS_KM};
pub use algorithms::geomath::{
    degrees_to_radians, radians_to_degrees, distance_meters, initial_bearing_degrees
};
pub use validation::{GeoError, GeoResult, InputPolicy};
pub use utils::{TrackerConfig, ConfigError};
pub use platform::{LocationService, LocationEvent, MockLocationService, ServiceError, ServiceResult};
pub use api::{
    PositionTracker, TrackerResult, TrackerError, TrackerEvent, TrackerStatus, Readout,
    DisplayReadout, ReadoutFormatter, TextFormatter, JsonFormatter, MapHandoff
};
