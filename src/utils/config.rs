use crate::core::{LocationAccuracy, DEFAULT_COORDINATE_VALUE, DISTANCE_UNIT_LABEL, EARTH_RADIUS_KM};
use crate::validation::data::{InputPolicy, SampleGuard, TargetFallback};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tracker configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Sphere radius used by the haversine distance (km)
    pub earth_radius_km: f64,
    /// Accuracy requested from the location service
    pub desired_accuracy: LocationAccuracy,
    /// Treatment of non-finite or out-of-range samples
    pub input_policy: InputPolicy,
    /// Check latitude/longitude ranges on incoming samples
    pub enforce_coordinate_ranges: bool,
    /// Recompute distance and bearing as soon as the target changes.
    /// Off by default: readouts refresh on the next location fix.
    pub recompute_on_target_change: bool,
    /// Show a heading that rounds to 360 as 0
    pub wrap_heading_display: bool,
    /// Unit label appended to the distance readout
    pub distance_unit_label: String,
    /// Value used for target text that does not parse
    pub target_fallback: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: EARTH_RADIUS_KM,
            desired_accuracy: LocationAccuracy::Best,
            input_policy: InputPolicy::Reject,
            enforce_coordinate_ranges: false,
            recompute_on_target_change: false,
            wrap_heading_display: false,
            distance_unit_label: DISTANCE_UNIT_LABEL.to_string(),
            target_fallback: DEFAULT_COORDINATE_VALUE,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => {
                write!(f, "I/O error: {}", message)
            }
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl TrackerConfig {
    /// Load and validate a configuration from a JSON file.
    /// Missing fields take their default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config = Self::from_json(&content).map_err(|e| match e {
            ConfigError::SerializationError { message } => ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, message),
            },
            other => other,
        })?;

        tracing::debug!("Loaded tracker config from {}", path_str);
        Ok(config)
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = serde_json::from_str(content)
            .map_err(|e| ConfigError::SerializationError { message: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.earth_radius_km.is_finite() || self.earth_radius_km <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "earth_radius_km".to_string(),
                value: self.earth_radius_km.to_string(),
                reason: "Radius must be a positive finite number".to_string(),
            });
        }

        if self.distance_unit_label.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "distance_unit_label".to_string(),
                value: self.distance_unit_label.clone(),
                reason: "Unit label must not be empty".to_string(),
            });
        }

        if !self.target_fallback.is_finite() {
            return Err(ConfigError::InvalidParameter {
                parameter: "target_fallback".to_string(),
                value: self.target_fallback.to_string(),
                reason: "Fallback must be a finite number".to_string(),
            });
        }

        Ok(())
    }

    /// Guard for incoming samples built from the input settings
    pub fn sample_guard(&self) -> SampleGuard {
        SampleGuard::new(self.input_policy, self.enforce_coordinate_ranges)
    }

    /// Parsing fallback for target text
    pub fn fallback(&self) -> TargetFallback {
        TargetFallback { value: self.target_fallback }
    }
}
