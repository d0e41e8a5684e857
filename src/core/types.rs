//! Core data types for target tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// The (0.0, 0.0) point an unedited target starts at
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Magnetic heading in degrees, [0, 360)
pub type HeadingSample = f64;

/// Progress of one update axis (location or heading)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisState {
    /// No sample received yet
    #[default]
    Uninitialized,
    /// At least one sample received; every new one overwrites the last
    Tracking,
}

/// Location permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    Denied,
    Restricted,
    AuthorizedWhenInUse,
    AuthorizedAlways,
}

impl AuthorizationStatus {
    /// Whether location fixes may be delivered under this status
    pub fn allows_location(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedWhenInUse | AuthorizationStatus::AuthorizedAlways
        )
    }
}

/// Accuracy requested from the location service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LocationAccuracy {
    #[default]
    Best,
    NearestTenMeters,
    HundredMeters,
    Kilometer,
}

impl LocationAccuracy {
    /// Nominal accuracy in metres, `None` for best available
    pub fn meters(&self) -> Option<f64> {
        match self {
            LocationAccuracy::Best => None,
            LocationAccuracy::NearestTenMeters => Some(10.0),
            LocationAccuracy::HundredMeters => Some(100.0),
            LocationAccuracy::Kilometer => Some(1000.0),
        }
    }
}
