//! Scripted location service for tests and scenario replay

use crate::core::{AuthorizationStatus, Coordinate, HeadingSample, LocationAccuracy};
use crate::platform::{LocationEvent, LocationService, ServiceError, ServiceResult};
use std::collections::VecDeque;

/// Mock location service fed with synthetic events
///
/// Location and heading events are only delivered while the matching stream
/// is running, the way a real platform only reports what was started.
/// Authorization events are always delivered.
pub struct MockLocationService {
    status: AuthorizationStatus,
    grant_on_request: AuthorizationStatus,
    accuracy: Option<LocationAccuracy>,
    event_queue: VecDeque<LocationEvent>,
    location_active: bool,
    heading_active: bool,
    available: bool,
    stopped: bool,
    start_calls: u32,
    stop_calls: u32,
    dropped_events: u32,
}

impl MockLocationService {
    /// Create a mock that grants "when in use" access on request
    pub fn new() -> Self {
        Self::with_authorization(AuthorizationStatus::AuthorizedWhenInUse)
    }

    /// Create a mock answering authorization requests with `status`
    pub fn with_authorization(status: AuthorizationStatus) -> Self {
        Self {
            status: AuthorizationStatus::NotDetermined,
            grant_on_request: status,
            accuracy: None,
            event_queue: VecDeque::new(),
            location_active: false,
            heading_active: false,
            available: true,
            stopped: false,
            start_calls: 0,
            stop_calls: 0,
            dropped_events: 0,
        }
    }

    /// Create a mock with no location hardware
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn push_event(&mut self, event: LocationEvent) {
        self.event_queue.push_back(event);
    }

    pub fn push_fix(&mut self, latitude: f64, longitude: f64) {
        self.push_event(LocationEvent::Location {
            fixes: vec![Coordinate::new(latitude, longitude)],
        });
    }

    pub fn push_heading(&mut self, degrees: HeadingSample) {
        self.push_event(LocationEvent::Heading { degrees });
    }

    /// Simulate the user changing the permission in system settings
    pub fn push_authorization(&mut self, status: AuthorizationStatus) {
        self.push_event(LocationEvent::Authorization { status });
    }

    /// Simulate the platform tearing the service down
    pub fn disconnect(&mut self) {
        self.stopped = true;
    }

    pub fn is_location_active(&self) -> bool {
        self.location_active
    }

    pub fn is_heading_active(&self) -> bool {
        self.heading_active
    }

    pub fn desired_accuracy(&self) -> Option<LocationAccuracy> {
        self.accuracy
    }

    pub fn queued_event_count(&self) -> usize {
        self.event_queue.len()
    }

    /// Number of start calls across both streams
    pub fn start_calls(&self) -> u32 {
        self.start_calls
    }

    /// Number of stop calls across both streams
    pub fn stop_calls(&self) -> u32 {
        self.stop_calls
    }

    /// Events discarded because their stream was not running
    pub fn dropped_events(&self) -> u32 {
        self.dropped_events
    }

    fn ensure_available(&self) -> ServiceResult<()> {
        if !self.available {
            return Err(ServiceError::Unavailable {
                details: "no location hardware".to_string(),
            });
        }
        if self.stopped {
            return Err(ServiceError::Stopped);
        }
        Ok(())
    }

    fn is_deliverable(&self, event: &LocationEvent) -> bool {
        match event {
            LocationEvent::Location { .. } => self.location_active,
            LocationEvent::Heading { .. } => self.heading_active,
            LocationEvent::Authorization { .. } => true,
        }
    }
}

impl Default for MockLocationService {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationService for MockLocationService {
    fn request_authorization(&mut self) -> AuthorizationStatus {
        if self.status == AuthorizationStatus::NotDetermined {
            self.status = self.grant_on_request;
        }
        self.status
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }

    fn set_desired_accuracy(&mut self, accuracy: LocationAccuracy) {
        self.accuracy = Some(accuracy);
    }

    fn start_location_updates(&mut self) -> ServiceResult<()> {
        self.ensure_available()?;
        self.start_calls += 1;
        self.location_active = true;
        Ok(())
    }

    fn stop_location_updates(&mut self) -> ServiceResult<()> {
        if !self.location_active {
            return Err(ServiceError::NotStarted { stream: "location" });
        }
        self.stop_calls += 1;
        self.location_active = false;
        Ok(())
    }

    fn start_heading_updates(&mut self) -> ServiceResult<()> {
        self.ensure_available()?;
        self.start_calls += 1;
        self.heading_active = true;
        Ok(())
    }

    fn stop_heading_updates(&mut self) -> ServiceResult<()> {
        if !self.heading_active {
            return Err(ServiceError::NotStarted { stream: "heading" });
        }
        self.stop_calls += 1;
        self.heading_active = false;
        Ok(())
    }

    fn next_event(&mut self) -> ServiceResult<Option<LocationEvent>> {
        if self.stopped {
            return Err(ServiceError::Stopped);
        }

        while let Some(event) = self.event_queue.pop_front() {
            if !self.is_deliverable(&event) {
                self.dropped_events += 1;
                continue;
            }
            if let LocationEvent::Authorization { status } = event {
                self.status = status;
            }
            return Ok(Some(event));
        }

        Ok(None)
    }
}
