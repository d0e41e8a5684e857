//! Input validation at the geodesic boundary

pub mod data;
pub mod error;

pub use data::{InputPolicy, SampleGuard, TargetFallback};
pub use error::{CoordinateField, GeoError, GeoResult};
