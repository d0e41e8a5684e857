//! Update-driven position tracker
//!
//! Holds the latest device fix, heading and user target, and refreshes
//! distance and bearing whenever a new fix arrives. Updates come either
//! pushed through the `on_*` handlers or pulled from the injected
//! `LocationService` with `process`.

use crate::algorithms::geomath::{distance_meters_with_radius, initial_bearing_degrees};
use crate::api::formatting::{DisplayReadout, ReadoutFormatter};
use crate::api::types::{
    Axis, CallbackHandle, EventCallback, MapHandoff, Readout, ReadoutCallback, TrackerError,
    TrackerEvent, TrackerResult, TrackerStatus,
};
use crate::core::{AuthorizationStatus, AxisState, Coordinate, HeadingSample, DEFAULT_COORDINATE_TEXT};
use crate::platform::{LocationEvent, LocationService};
use crate::utils::config::TrackerConfig;
use crate::validation::data::{SampleGuard, TargetFallback};
use crate::validation::error::{GeoError, GeoResult};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub struct PositionTracker<S: LocationService> {
    service: S,
    config: TrackerConfig,
    guard: SampleGuard,
    fallback: TargetFallback,
    formatter: ReadoutFormatter,
    target: Coordinate,
    target_text: MapHandoff,
    device: Option<Coordinate>,
    heading: Option<HeadingSample>,
    distance_m: Option<f64>,
    bearing_deg: Option<f64>,
    status: TrackerStatus,
    location_started: bool,
    heading_started: bool,
    callback_counter: u32,
    readout_callbacks: BTreeMap<CallbackHandle, ReadoutCallback>,
    event_callbacks: BTreeMap<CallbackHandle, EventCallback>,
}

impl<S: LocationService> PositionTracker<S> {
    pub fn new(service: S, config: TrackerConfig) -> Self {
        Self {
            guard: config.sample_guard(),
            fallback: config.fallback(),
            formatter: ReadoutFormatter::from_config(&config),
            service,
            config,
            target: Coordinate::origin(),
            target_text: MapHandoff::default(),
            device: None,
            heading: None,
            distance_m: None,
            bearing_deg: None,
            status: TrackerStatus::default(),
            location_started: false,
            heading_started: false,
            callback_counter: 0,
            readout_callbacks: BTreeMap::new(),
            event_callbacks: BTreeMap::new(),
        }
    }

    /// Request permission and start the update streams.
    ///
    /// A denied permission is not an error: heading updates still run and
    /// the location axis stays uninitialized.
    pub fn start(&mut self) -> TrackerResult<()> {
        if self.status.running {
            return Ok(());
        }
        self.config.validate()?;

        self.service.set_desired_accuracy(self.config.desired_accuracy);
        let status = self.service.request_authorization();
        self.apply_authorization(status)?;

        if let Err(e) = self.service.start_heading_updates() {
            // Location updates may already be running
            if let Err(stop_error) = self.stop_streams() {
                warn!("Failed to stop location updates after start error: {}", stop_error);
            }
            return Err(e.into());
        }
        self.heading_started = true;

        self.status.running = true;
        match self.config.desired_accuracy.meters() {
            Some(meters) => info!("Tracker started (authorization {:?}, accuracy {} m)", status, meters),
            None => info!("Tracker started (authorization {:?}, best accuracy)", status),
        }
        Ok(())
    }

    /// Stop both update streams and drop all callbacks.
    ///
    /// The tracker is shut down even when a stream fails to stop; the first
    /// such error is returned.
    pub fn shutdown(&mut self) -> TrackerResult<()> {
        let result = self.stop_streams();
        self.readout_callbacks.clear();
        self.event_callbacks.clear();
        self.status.running = false;
        info!("Tracker shut down");
        result
    }

    /// Attempts to stop every started stream and reports the first failure
    fn stop_streams(&mut self) -> TrackerResult<()> {
        let mut first_error = None;

        if self.location_started {
            self.location_started = false;
            if let Err(e) = self.service.stop_location_updates() {
                warn!("Failed to stop location updates: {}", e);
                first_error.get_or_insert(e);
            }
        }
        if self.heading_started {
            self.heading_started = false;
            if let Err(e) = self.service.stop_heading_updates() {
                warn!("Failed to stop heading updates: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Drain pending service events. Returns the number handled.
    pub fn process(&mut self) -> TrackerResult<u32> {
        if !self.status.running {
            return Err(TrackerError::NotStarted);
        }

        let mut handled = 0;
        while let Some(event) = self.service.next_event()? {
            // Rejected samples are logged and published by the handlers
            match event {
                LocationEvent::Location { fixes } => {
                    self.on_location_batch(&fixes).ok();
                }
                LocationEvent::Heading { degrees } => {
                    self.on_heading_update(degrees).ok();
                }
                LocationEvent::Authorization { status } => {
                    self.on_authorization_changed(status)?;
                }
            }
            handled += 1;
        }

        Ok(handled)
    }

    /// New device fix: store it and refresh distance and bearing
    pub fn on_location_update(&mut self, coord: Coordinate) -> GeoResult<()> {
        let coord = match self.guard.coordinate(coord) {
            Ok(coord) => coord,
            Err(error) => return Err(self.reject(error)),
        };

        self.device = Some(coord);
        self.status.location_updates += 1;
        self.set_axis(Axis::Location, AxisState::Tracking);
        self.recompute();

        debug!(
            "Fix {} -> distance {:?} m, bearing {:?}",
            coord, self.distance_m, self.bearing_deg
        );
        self.publish_readout();
        Ok(())
    }

    /// Batched fixes from the platform; the first one is used
    pub fn on_location_batch(&mut self, fixes: &[Coordinate]) -> GeoResult<()> {
        match fixes.first() {
            Some(first) => self.on_location_update(*first),
            None => {
                debug!("Ignoring empty location batch");
                Ok(())
            }
        }
    }

    /// New compass reading, stored rounded to whole degrees
    pub fn on_heading_update(&mut self, heading: HeadingSample) -> GeoResult<()> {
        let heading = match self.guard.heading(heading) {
            Ok(heading) => heading,
            Err(error) => return Err(self.reject(error)),
        };

        self.heading = Some(heading.round());
        self.status.heading_updates += 1;
        self.set_axis(Axis::Heading, AxisState::Tracking);

        debug!("Heading {} -> {:?}", heading, self.heading);
        self.publish_readout();
        Ok(())
    }

    /// Permission changed after start
    pub fn on_authorization_changed(&mut self, status: AuthorizationStatus) -> TrackerResult<()> {
        if !self.status.running {
            self.status.authorization = status;
            return Ok(());
        }
        self.apply_authorization(status)
    }

    fn apply_authorization(&mut self, status: AuthorizationStatus) -> TrackerResult<()> {
        let old_status = self.status.authorization;
        self.status.authorization = status;

        if status.allows_location() {
            if !self.location_started {
                self.service.start_location_updates()?;
                self.location_started = true;
            }
        } else {
            if self.location_started {
                self.service.stop_location_updates()?;
                self.location_started = false;
            }
            warn!("Location access {:?}; position readouts keep their last values", status);
        }

        if old_status != status {
            self.trigger_event(TrackerEvent::AuthorizationChanged {
                old_status,
                new_status: status,
            });
        }
        Ok(())
    }

    /// Update the target from the two text fields.
    ///
    /// Text that is missing or does not parse becomes the fallback value.
    /// Readouts refresh on the next fix unless `recompute_on_target_change`
    /// is set.
    pub fn set_target(&mut self, latitude: Option<&str>, longitude: Option<&str>) -> Coordinate {
        self.target_text = MapHandoff {
            latitude: latitude.unwrap_or(DEFAULT_COORDINATE_TEXT).to_string(),
            longitude: longitude.unwrap_or(DEFAULT_COORDINATE_TEXT).to_string(),
        };
        self.target = self.fallback.parse_coordinate(latitude, longitude);
        debug!("Target set to {}", self.target);

        self.trigger_event(TrackerEvent::TargetChanged { target: self.target });

        if self.config.recompute_on_target_change && self.device.is_some() {
            self.recompute();
            self.publish_readout();
        }
        self.target
    }

    /// Raw target texts for the map screen
    pub fn map_handoff(&self) -> MapHandoff {
        self.target_text.clone()
    }

    fn recompute(&mut self) {
        if let Some(device) = self.device {
            self.distance_m = Some(distance_meters_with_radius(
                device,
                self.target,
                self.config.earth_radius_km,
            ));
            self.bearing_deg = Some(initial_bearing_degrees(device, self.target));
        }
    }

    fn reject(&mut self, error: GeoError) -> GeoError {
        self.status.rejected_samples += 1;
        warn!("Rejected sample: {}", error);
        self.trigger_event(TrackerEvent::InputRejected { error: error.clone() });
        error
    }

    fn set_axis(&mut self, axis: Axis, new_state: AxisState) {
        let slot = match axis {
            Axis::Location => &mut self.status.location_axis,
            Axis::Heading => &mut self.status.heading_axis,
        };
        let old_state = *slot;
        if old_state == new_state {
            return;
        }
        *slot = new_state;

        info!("{:?} axis {:?} -> {:?}", axis, old_state, new_state);
        self.trigger_event(TrackerEvent::AxisChanged { axis, old_state, new_state });
    }

    pub fn readout(&self) -> Readout {
        Readout {
            device: self.device,
            distance_m: self.distance_m,
            bearing_deg: self.bearing_deg,
            heading_deg: self.heading,
        }
    }

    pub fn display(&self) -> DisplayReadout {
        self.formatter.display(&self.readout())
    }

    pub fn status(&self) -> &TrackerStatus {
        &self.status
    }

    pub fn target(&self) -> Coordinate {
        self.target
    }

    pub fn device_position(&self) -> Option<Coordinate> {
        self.device
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn register_readout_callback(&mut self, callback: ReadoutCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle::new(self.callback_counter);
        self.readout_callbacks.insert(handle, callback);
        handle
    }

    pub fn register_event_callback(&mut self, callback: EventCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle::new(self.callback_counter);
        self.event_callbacks.insert(handle, callback);
        handle
    }

    /// Returns false if the handle was unknown
    pub fn unregister_callback(&mut self, handle: CallbackHandle) -> bool {
        self.readout_callbacks.remove(&handle).is_some()
            || self.event_callbacks.remove(&handle).is_some()
    }

    pub fn callback_count(&self) -> (usize, usize) {
        (self.readout_callbacks.len(), self.event_callbacks.len())
    }

    fn publish_readout(&self) {
        if self.readout_callbacks.is_empty() {
            return;
        }
        let display = self.display();
        for callback in self.readout_callbacks.values() {
            callback(&display);
        }
    }

    fn trigger_event(&self, event: TrackerEvent) {
        for callback in self.event_callbacks.values() {
            callback(&event);
        }
    }
}

impl<S: LocationService> Drop for PositionTracker<S> {
    fn drop(&mut self) {
        if self.location_started || self.heading_started {
            if let Err(e) = self.stop_streams() {
                warn!("Failed to stop update streams on drop: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LocationAccuracy;
    use crate::platform::{MockLocationService, ServiceError, ServiceResult};
    use crate::validation::data::InputPolicy;
    use crate::validation::error::CoordinateField;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Service whose stream flags stay visible after the tracker takes it
    #[derive(Default)]
    struct SharedFlagsService {
        location_active: Rc<Cell<bool>>,
        heading_active: Rc<Cell<bool>>,
        fail_heading_start: bool,
        fail_location_stop: bool,
    }

    impl LocationService for SharedFlagsService {
        fn request_authorization(&mut self) -> AuthorizationStatus {
            AuthorizationStatus::AuthorizedWhenInUse
        }

        fn authorization_status(&self) -> AuthorizationStatus {
            AuthorizationStatus::AuthorizedWhenInUse
        }

        fn set_desired_accuracy(&mut self, _accuracy: LocationAccuracy) {}

        fn start_location_updates(&mut self) -> ServiceResult<()> {
            self.location_active.set(true);
            Ok(())
        }

        fn stop_location_updates(&mut self) -> ServiceResult<()> {
            if self.fail_location_stop {
                return Err(ServiceError::Stopped);
            }
            self.location_active.set(false);
            Ok(())
        }

        fn start_heading_updates(&mut self) -> ServiceResult<()> {
            if self.fail_heading_start {
                return Err(ServiceError::Unavailable {
                    details: "no compass".to_string(),
                });
            }
            self.heading_active.set(true);
            Ok(())
        }

        fn stop_heading_updates(&mut self) -> ServiceResult<()> {
            self.heading_active.set(false);
            Ok(())
        }

        fn next_event(&mut self) -> ServiceResult<Option<LocationEvent>> {
            Ok(None)
        }
    }

    fn started_tracker() -> PositionTracker<MockLocationService> {
        let mut tracker = PositionTracker::new(MockLocationService::new(), TrackerConfig::default());
        tracker.start().unwrap();
        tracker
    }

    #[test]
    fn test_initial_state() {
        let tracker = PositionTracker::new(MockLocationService::new(), TrackerConfig::default());
        assert_eq!(tracker.target(), Coordinate::new(0.0, 0.0));
        assert_eq!(tracker.device_position(), None);
        assert_eq!(tracker.status().location_axis, AxisState::Uninitialized);
        assert_eq!(tracker.status().heading_axis, AxisState::Uninitialized);
        assert_eq!(tracker.display(), DisplayReadout::default());
        assert_eq!(tracker.map_handoff(), MapHandoff::default());
    }

    #[test]
    fn test_start_requests_permission_and_streams() {
        let tracker = started_tracker();
        assert!(tracker.status().running);
        assert_eq!(tracker.status().authorization, AuthorizationStatus::AuthorizedWhenInUse);
        assert!(tracker.service().is_location_active());
        assert!(tracker.service().is_heading_active());
        assert_eq!(
            tracker.service().desired_accuracy(),
            Some(crate::core::LocationAccuracy::Best)
        );
    }

    #[test]
    fn test_location_update_computes_distance_and_bearing() {
        let mut tracker = started_tracker();
        tracker.set_target(Some("0.0"), Some("1.0"));
        tracker.on_location_update(Coordinate::new(0.0, 0.0)).unwrap();

        let display = tracker.display();
        assert_eq!(display.latitude, "0.0");
        assert_eq!(display.longitude, "0.0");
        assert_eq!(display.distance, "111195 Meter");
        assert_eq!(display.bearing, "90");
        assert_eq!(tracker.status().location_axis, AxisState::Tracking);
    }

    #[test]
    fn test_bearing_due_north() {
        let mut tracker = started_tracker();
        tracker.set_target(Some("1.0"), Some("0.0"));
        tracker.on_location_update(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(tracker.display().bearing, "0");
    }

    #[test]
    fn test_device_at_target() {
        let mut tracker = started_tracker();
        tracker.set_target(Some("47.3769"), Some("8.5417"));
        tracker.on_location_update(Coordinate::new(47.3769, 8.5417)).unwrap();
        let readout = tracker.readout();
        assert_eq!(readout.distance_m, Some(0.0));
        assert_eq!(readout.bearing_deg, Some(0.0));
    }

    #[test]
    fn test_target_parse_fallback() {
        let mut tracker = started_tracker();
        let target = tracker.set_target(Some("abc"), Some("12.5"));
        assert_eq!(target, Coordinate::new(0.0, 12.5));
        assert_eq!(tracker.target(), Coordinate::new(0.0, 12.5));

        let handoff = tracker.map_handoff();
        assert_eq!(handoff.latitude, "abc");
        assert_eq!(handoff.longitude, "12.5");

        tracker.set_target(None, None);
        assert_eq!(tracker.target(), Coordinate::origin());
        assert_eq!(tracker.map_handoff(), MapHandoff::default());
    }

    #[test]
    fn test_target_change_waits_for_next_fix() {
        let mut tracker = started_tracker();
        tracker.on_location_update(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(tracker.display().distance, "0 Meter");

        tracker.set_target(Some("0.0"), Some("1.0"));
        assert_eq!(tracker.display().distance, "0 Meter");

        tracker.on_location_update(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(tracker.display().distance, "111195 Meter");
    }

    #[test]
    fn test_target_change_recomputes_when_configured() {
        let config = TrackerConfig {
            recompute_on_target_change: true,
            ..Default::default()
        };
        let mut tracker = PositionTracker::new(MockLocationService::new(), config);
        tracker.start().unwrap();

        // No fix yet, nothing to recompute
        tracker.set_target(Some("0.0"), Some("1.0"));
        assert_eq!(tracker.readout().distance_m, None);

        tracker.on_location_update(Coordinate::new(0.0, 0.0)).unwrap();
        tracker.set_target(Some("1.0"), Some("0.0"));
        assert_eq!(tracker.display().bearing, "0");
    }

    #[test]
    fn test_heading_rounds_without_wrap() {
        let mut tracker = started_tracker();
        tracker.on_heading_update(359.6).unwrap();
        assert_eq!(tracker.display().heading, "360");
        assert_eq!(tracker.readout().heading_deg, Some(360.0));
        assert_eq!(tracker.status().heading_axis, AxisState::Tracking);
        // Heading alone leaves the location fields empty
        assert_eq!(tracker.display().distance, "");
    }

    #[test]
    fn test_heading_wrap_option() {
        let config = TrackerConfig {
            wrap_heading_display: true,
            ..Default::default()
        };
        let mut tracker = PositionTracker::new(MockLocationService::new(), config);
        tracker.on_heading_update(359.6).unwrap();
        assert_eq!(tracker.display().heading, "0");
    }

    #[test]
    fn test_non_finite_fix_rejected_and_readout_kept() {
        let mut tracker = started_tracker();
        tracker.set_target(Some("0.0"), Some("1.0"));
        tracker.on_location_update(Coordinate::new(0.0, 0.0)).unwrap();
        let before = tracker.display();

        let err = tracker.on_location_update(Coordinate::new(f64::NAN, 0.0)).unwrap_err();
        assert_eq!(err.field(), CoordinateField::Latitude);
        assert_eq!(tracker.display(), before);
        assert_eq!(tracker.status().rejected_samples, 1);
        assert_eq!(tracker.status().location_updates, 1);

        assert!(tracker.on_heading_update(f64::INFINITY).is_err());
        assert_eq!(tracker.status().heading_axis, AxisState::Uninitialized);
    }

    #[test]
    fn test_clamp_policy_accepts_non_finite() {
        let config = TrackerConfig {
            input_policy: InputPolicy::Clamp,
            ..Default::default()
        };
        let mut tracker = PositionTracker::new(MockLocationService::new(), config);
        tracker.on_location_update(Coordinate::new(f64::NAN, 1.0)).unwrap();
        assert_eq!(tracker.device_position(), Some(Coordinate::new(0.0, 1.0)));
        let distance = tracker.readout().distance_m.unwrap();
        assert!(distance.is_finite());
    }

    #[test]
    fn test_permission_denied_is_degraded_mode() {
        let service = MockLocationService::with_authorization(AuthorizationStatus::Denied);
        let mut tracker = PositionTracker::new(service, TrackerConfig::default());
        tracker.start().unwrap();

        assert!(!tracker.service().is_location_active());
        assert!(tracker.service().is_heading_active());

        tracker.service_mut().push_fix(10.0, 10.0);
        tracker.service_mut().push_heading(90.0);
        tracker.process().unwrap();

        assert_eq!(tracker.status().location_axis, AxisState::Uninitialized);
        assert_eq!(tracker.status().heading_axis, AxisState::Tracking);
        assert_eq!(tracker.display().latitude, "");
        assert_eq!(tracker.display().heading, "90");
    }

    #[test]
    fn test_authorization_granted_later() {
        let service = MockLocationService::with_authorization(AuthorizationStatus::Denied);
        let mut tracker = PositionTracker::new(service, TrackerConfig::default());
        tracker.start().unwrap();

        tracker.service_mut().push_authorization(AuthorizationStatus::AuthorizedWhenInUse);
        tracker.service_mut().push_fix(0.0, 0.0);
        let handled = tracker.process().unwrap();

        assert_eq!(handled, 2);
        assert!(tracker.service().is_location_active());
        assert_eq!(tracker.status().location_axis, AxisState::Tracking);
    }

    #[test]
    fn test_process_burst_keeps_latest() {
        let mut tracker = started_tracker();
        tracker.set_target(Some("0.0"), Some("1.0"));
        for i in 0..100 {
            tracker.service_mut().push_fix(0.0, i as f64 / 100.0);
        }
        tracker.service_mut().push_fix(0.0, 0.0);

        let handled = tracker.process().unwrap();
        assert_eq!(handled, 101);
        assert_eq!(tracker.status().location_updates, 101);
        assert_eq!(tracker.device_position(), Some(Coordinate::new(0.0, 0.0)));
        assert_eq!(tracker.display().distance, "111195 Meter");
    }

    #[test]
    fn test_process_skips_rejected_samples() {
        let mut tracker = started_tracker();
        tracker.service_mut().push_fix(f64::NAN, 0.0);
        tracker.service_mut().push_heading(f64::INFINITY);
        tracker.service_mut().push_fix(1.0, 1.0);

        assert_eq!(tracker.process(), Ok(3));
        assert_eq!(tracker.status().rejected_samples, 2);
        assert_eq!(tracker.device_position(), Some(Coordinate::new(1.0, 1.0)));
    }

    #[test]
    fn test_empty_batch_ignored() {
        let mut tracker = started_tracker();
        tracker.on_location_batch(&[]).unwrap();
        assert_eq!(tracker.status().location_axis, AxisState::Uninitialized);

        tracker
            .on_location_batch(&[Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)])
            .unwrap();
        assert_eq!(tracker.device_position(), Some(Coordinate::new(1.0, 1.0)));
    }

    #[test]
    fn test_process_requires_start() {
        let mut tracker = PositionTracker::new(MockLocationService::new(), TrackerConfig::default());
        assert_eq!(tracker.process(), Err(TrackerError::NotStarted));
    }

    #[test]
    fn test_service_errors_propagate() {
        let mut tracker = PositionTracker::new(MockLocationService::unavailable(), TrackerConfig::default());
        let result = tracker.start();
        assert!(matches!(result, Err(TrackerError::Service(ServiceError::Unavailable { .. }))));

        let mut tracker = started_tracker();
        tracker.service_mut().disconnect();
        assert_eq!(tracker.process(), Err(TrackerError::Service(ServiceError::Stopped)));
    }

    #[test]
    fn test_invalid_config_fails_start() {
        let config = TrackerConfig {
            earth_radius_km: 0.0,
            ..Default::default()
        };
        let mut tracker = PositionTracker::new(MockLocationService::new(), config);
        assert!(matches!(tracker.start(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_callbacks() {
        let mut tracker = started_tracker();
        let readouts = Rc::new(RefCell::new(Vec::new()));
        let events = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&readouts);
        let readout_handle = tracker.register_readout_callback(Box::new(move |display: &DisplayReadout| {
            sink.borrow_mut().push(display.clone());
        }));
        let sink = Rc::clone(&events);
        tracker.register_event_callback(Box::new(move |event: &TrackerEvent| {
            sink.borrow_mut().push(event.clone());
        }));
        assert_eq!(tracker.callback_count(), (1, 1));

        tracker.set_target(Some("0.0"), Some("1.0"));
        tracker.on_location_update(Coordinate::new(0.0, 0.0)).unwrap();
        tracker.on_location_update(Coordinate::new(0.0, 0.5)).unwrap();
        let _ = tracker.on_heading_update(f64::NAN);

        assert_eq!(readouts.borrow().len(), 2);
        assert_eq!(readouts.borrow()[0].distance, "111195 Meter");

        let events = events.borrow();
        assert!(matches!(events[0], TrackerEvent::TargetChanged { .. }));
        assert_eq!(
            events[1],
            TrackerEvent::AxisChanged {
                axis: Axis::Location,
                old_state: AxisState::Uninitialized,
                new_state: AxisState::Tracking,
            }
        );
        assert!(matches!(events[2], TrackerEvent::InputRejected { .. }));
        assert_eq!(events.len(), 3);

        assert!(tracker.unregister_callback(readout_handle));
        assert!(!tracker.unregister_callback(readout_handle));
        assert_eq!(tracker.callback_count(), (0, 1));
    }

    #[test]
    fn test_shutdown_stops_streams() {
        let mut tracker = started_tracker();
        tracker.register_readout_callback(Box::new(|_: &DisplayReadout| {}));
        tracker.shutdown().unwrap();

        assert!(!tracker.status().running);
        assert!(!tracker.service().is_location_active());
        assert!(!tracker.service().is_heading_active());
        assert_eq!(tracker.callback_count(), (0, 0));
        assert_eq!(tracker.service().stop_calls(), 2);
    }

    #[test]
    fn test_drop_stops_streams() {
        let service = SharedFlagsService::default();
        let location = Rc::clone(&service.location_active);
        let heading = Rc::clone(&service.heading_active);

        let mut tracker = PositionTracker::new(service, TrackerConfig::default());
        tracker.start().unwrap();
        assert!(location.get());
        assert!(heading.get());

        drop(tracker);
        assert!(!location.get());
        assert!(!heading.get());
    }

    #[test]
    fn test_failed_heading_start_releases_location_stream() {
        let service = SharedFlagsService {
            fail_heading_start: true,
            ..Default::default()
        };
        let location = Rc::clone(&service.location_active);
        let heading = Rc::clone(&service.heading_active);

        let mut tracker = PositionTracker::new(service, TrackerConfig::default());
        let result = tracker.start();
        assert!(matches!(result, Err(TrackerError::Service(ServiceError::Unavailable { .. }))));
        assert!(!tracker.status().running);
        assert!(!location.get());
        assert!(!heading.get());

        drop(tracker);
        assert!(!location.get());
    }

    #[test]
    fn test_shutdown_finishes_after_stop_error() {
        let service = SharedFlagsService {
            fail_location_stop: true,
            ..Default::default()
        };
        let heading = Rc::clone(&service.heading_active);

        let mut tracker = PositionTracker::new(service, TrackerConfig::default());
        tracker.start().unwrap();
        tracker.register_readout_callback(Box::new(|_: &DisplayReadout| {}));

        assert_eq!(tracker.shutdown(), Err(TrackerError::Service(ServiceError::Stopped)));
        assert!(!heading.get());
        assert!(!tracker.status().running);
        assert_eq!(tracker.callback_count(), (0, 0));
    }
}
