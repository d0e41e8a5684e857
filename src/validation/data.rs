use crate::core::{Coordinate, HeadingSample, DEFAULT_COORDINATE_VALUE, LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::validation::error::{CoordinateField, GeoError, GeoResult};
use serde::{Serialize, Deserialize};

/// How non-finite or out-of-range samples are treated before any math runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputPolicy {
    /// Drop the sample with a `GeoError`
    #[default]
    Reject,
    /// Replace non-finite components with 0.0 and clamp into range
    Clamp,
}

/// Fallback applied when target text is absent or does not parse
///
/// The target field always resolves to a number; a bad entry never
/// surfaces as an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFallback {
    pub value: f64,
}

impl Default for TargetFallback {
    fn default() -> Self {
        Self { value: DEFAULT_COORDINATE_VALUE }
    }
}

impl TargetFallback {
    /// Parse one target field, substituting the fallback value on failure
    pub fn parse(&self, text: Option<&str>) -> f64 {
        text.and_then(|t| t.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(self.value)
    }

    /// Parse both target fields into a coordinate
    pub fn parse_coordinate(&self, latitude: Option<&str>, longitude: Option<&str>) -> Coordinate {
        Coordinate::new(self.parse(latitude), self.parse(longitude))
    }
}

fn check_finite(field: CoordinateField, value: f64) -> GeoResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeoError::InvalidCoordinate { field, value })
    }
}

fn check_range(field: CoordinateField, value: f64, (min, max): (f64, f64)) -> GeoResult<()> {
    if value < min || value > max {
        Err(GeoError::OutOfRange { field, value, min, max })
    } else {
        Ok(())
    }
}

/// Fails with `InvalidCoordinate` if either component is NaN or infinite
pub fn ensure_finite(coord: &Coordinate) -> GeoResult<()> {
    check_finite(CoordinateField::Latitude, coord.latitude)?;
    check_finite(CoordinateField::Longitude, coord.longitude)
}

/// Fails with `OutOfRange` if a finite component leaves its valid range
pub fn ensure_in_range(coord: &Coordinate) -> GeoResult<()> {
    check_range(CoordinateField::Latitude, coord.latitude, LATITUDE_RANGE)?;
    check_range(CoordinateField::Longitude, coord.longitude, LONGITUDE_RANGE)
}

fn clamp_component(value: f64, (min, max): (f64, f64), enforce_range: bool) -> f64 {
    let value = if value.is_finite() { value } else { DEFAULT_COORDINATE_VALUE };
    if enforce_range {
        value.clamp(min, max)
    } else {
        value
    }
}

/// Guard applied to every incoming position sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleGuard {
    pub policy: InputPolicy,
    pub enforce_ranges: bool,
}

impl SampleGuard {
    pub fn new(policy: InputPolicy, enforce_ranges: bool) -> Self {
        Self { policy, enforce_ranges }
    }

    pub fn coordinate(&self, coord: Coordinate) -> GeoResult<Coordinate> {
        match self.policy {
            InputPolicy::Reject => {
                ensure_finite(&coord)?;
                if self.enforce_ranges {
                    ensure_in_range(&coord)?;
                }
                Ok(coord)
            }
            InputPolicy::Clamp => Ok(Coordinate::new(
                clamp_component(coord.latitude, LATITUDE_RANGE, self.enforce_ranges),
                clamp_component(coord.longitude, LONGITUDE_RANGE, self.enforce_ranges),
            )),
        }
    }

    pub fn heading(&self, heading: HeadingSample) -> GeoResult<HeadingSample> {
        match self.policy {
            InputPolicy::Reject => {
                check_finite(CoordinateField::Heading, heading)?;
                Ok(heading)
            }
            InputPolicy::Clamp => Ok(if heading.is_finite() { heading } else { 0.0 }),
        }
    }
}
