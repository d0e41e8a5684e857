use std::fmt;
use serde::{Serialize, Deserialize};

/// Which component of a sample failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateField {
    Latitude,
    Longitude,
    Heading,
}

impl fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateField::Latitude => write!(f, "latitude"),
            CoordinateField::Longitude => write!(f, "longitude"),
            CoordinateField::Heading => write!(f, "heading"),
        }
    }
}

/// Errors raised at the geodesic boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeoError {
    /// NaN or infinite component
    InvalidCoordinate {
        field: CoordinateField,
        value: f64,
    },
    /// Finite component outside its valid range
    OutOfRange {
        field: CoordinateField,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl GeoError {
    pub fn field(&self) -> CoordinateField {
        match self {
            GeoError::InvalidCoordinate { field, .. } => *field,
            GeoError::OutOfRange { field, .. } => *field,
        }
    }
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::InvalidCoordinate { field, value } => {
                write!(f, "Invalid {}: {} is not a finite number", field, value)
            }
            GeoError::OutOfRange { field, value, min, max } => {
                write!(f, "{} {} out of range [{}, {}]", field, value, min, max)
            }
        }
    }
}

impl std::error::Error for GeoError {}

/// Result type for checked geodesic operations
pub type GeoResult<T> = Result<T, GeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeoError::InvalidCoordinate {
            field: CoordinateField::Latitude,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "Invalid latitude: NaN is not a finite number");

        let err = GeoError::OutOfRange {
            field: CoordinateField::Longitude,
            value: 200.0,
            min: -180.0,
            max: 180.0,
        };
        assert_eq!(err.to_string(), "longitude 200 out of range [-180, 180]");
        assert_eq!(err.field(), CoordinateField::Longitude);
    }
}
