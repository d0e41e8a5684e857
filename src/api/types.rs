//! Common API types and data structures

use crate::api::formatting::DisplayReadout;
use crate::core::{AuthorizationStatus, AxisState, Coordinate, DEFAULT_COORDINATE_TEXT};
use crate::platform::ServiceError;
use crate::utils::config::ConfigError;
use crate::validation::error::GeoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for tracker lifecycle operations
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Tracker error types
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Invalid configuration
    Config(ConfigError),
    /// Location service failure
    Service(ServiceError),
    /// Operation needs a started tracker
    NotStarted,
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::Config(error) => write!(f, "Tracker configuration error: {}", error),
            TrackerError::Service(error) => write!(f, "Tracker service error: {}", error),
            TrackerError::NotStarted => write!(f, "Tracker has not been started"),
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerError::Config(error) => Some(error),
            TrackerError::Service(error) => Some(error),
            TrackerError::NotStarted => None,
        }
    }
}

impl From<ConfigError> for TrackerError {
    fn from(error: ConfigError) -> Self {
        TrackerError::Config(error)
    }
}

impl From<ServiceError> for TrackerError {
    fn from(error: ServiceError) -> Self {
        TrackerError::Service(error)
    }
}

/// Latest computed values, `None` until the matching input has arrived
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Readout {
    /// Latest device position
    pub device: Option<Coordinate>,
    /// Great-circle distance from device to target (metres)
    pub distance_m: Option<f64>,
    /// Initial bearing from device to target (degrees, [0, 360))
    pub bearing_deg: Option<f64>,
    /// Latest magnetic heading, already rounded (degrees)
    pub heading_deg: Option<f64>,
}

/// Update axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Location,
    Heading,
}

/// Events published to event callbacks
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// An update axis moved to a new state
    AxisChanged {
        axis: Axis,
        old_state: AxisState,
        new_state: AxisState,
    },
    /// Location permission changed
    AuthorizationChanged {
        old_status: AuthorizationStatus,
        new_status: AuthorizationStatus,
    },
    /// A sample was dropped at the input guard
    InputRejected { error: GeoError },
    /// The user edited the target fields
    TargetChanged { target: Coordinate },
}

/// Raw target texts handed to the map screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapHandoff {
    pub latitude: String,
    pub longitude: String,
}

impl Default for MapHandoff {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_COORDINATE_TEXT.to_string(),
            longitude: DEFAULT_COORDINATE_TEXT.to_string(),
        }
    }
}

/// Tracker state information
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackerStatus {
    /// Whether `start` has run and `shutdown` has not
    pub running: bool,
    pub location_axis: AxisState,
    pub heading_axis: AxisState,
    pub authorization: AuthorizationStatus,
    /// Accepted location fixes
    pub location_updates: u32,
    /// Accepted heading samples
    pub heading_updates: u32,
    /// Samples dropped by the input guard
    pub rejected_samples: u32,
}

/// Callback function type for readout updates
pub type ReadoutCallback = Box<dyn Fn(&DisplayReadout)>;

/// Callback function type for tracker events
pub type EventCallback = Box<dyn Fn(&TrackerEvent)>;

/// Callback registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    pub(crate) fn new(id: u32) -> Self {
        CallbackHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}
