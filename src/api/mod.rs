//! Tracker API
//!
//! `PositionTracker` is the entry point. It is driven by location service
//! events and hands display strings to registered callbacks.

pub mod tracker;
pub mod types;
pub mod formatting;

pub use tracker::PositionTracker;
pub use types::{
    TrackerResult, TrackerError, TrackerEvent, TrackerStatus, Readout, Axis,
    MapHandoff, CallbackHandle, ReadoutCallback, EventCallback
};
pub use formatting::{DisplayReadout, ReadoutFormatter, TextFormatter, JsonFormatter};
