//! Location service trait and event types

use crate::core::{AuthorizationStatus, Coordinate, HeadingSample, LocationAccuracy};
use crate::platform::ServiceResult;
use serde::{Deserialize, Serialize};

/// A single delivery from the location service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LocationEvent {
    /// One or more position fixes, most relevant first
    Location { fixes: Vec<Coordinate> },
    /// A magnetic heading reading in degrees
    Heading { degrees: HeadingSample },
    /// The user granted or revoked location access
    Authorization { status: AuthorizationStatus },
}

/// Source of location and heading updates
pub trait LocationService {
    /// Ask for "when in use" location access and report the resulting status.
    /// Platforms may answer later through a `LocationEvent::Authorization`.
    fn request_authorization(&mut self) -> AuthorizationStatus;

    /// Current permission status without prompting
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Accuracy hint for subsequent fixes
    fn set_desired_accuracy(&mut self, accuracy: LocationAccuracy);

    fn start_location_updates(&mut self) -> ServiceResult<()>;

    fn stop_location_updates(&mut self) -> ServiceResult<()>;

    fn start_heading_updates(&mut self) -> ServiceResult<()>;

    fn stop_heading_updates(&mut self) -> ServiceResult<()>;

    /// Next pending event.
    /// Returns Ok(None) when nothing is queued (non-blocking).
    fn next_event(&mut self) -> ServiceResult<Option<LocationEvent>>;
}
