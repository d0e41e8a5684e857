//! Configuration

pub mod config;

pub use config::{TrackerConfig, ConfigError};
