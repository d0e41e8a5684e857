//! Readout formatting
//!
//! Turns numeric readouts into the strings the screen shows, plus text and
//! JSON renderings for logs and the replay tool.

use crate::api::types::Readout;
use crate::core::DISTANCE_UNIT_LABEL;
use crate::utils::config::TrackerConfig;
use serde::{Deserialize, Serialize};

/// Display-ready strings; fields with no data yet are empty
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayReadout {
    pub latitude: String,
    pub longitude: String,
    pub distance: String,
    pub bearing: String,
    pub heading: String,
}

/// Coordinate component with at least one fractional digit ("0.0", "47.3769")
pub fn format_coordinate_component(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

// Adding 0.0 turns a rounded -0.0 into 0.0
fn format_whole(value: f64) -> String {
    format!("{:.0}", value.round() + 0.0)
}

/// Distance rounded to whole metres with its unit label
pub fn format_distance(meters: f64, unit_label: &str) -> String {
    format!("{} {}", format_whole(meters), unit_label)
}

/// Bearing rounded to whole degrees, kept in [0, 360)
pub fn format_bearing(degrees: f64) -> String {
    let rounded = degrees.round();
    if rounded >= 360.0 {
        format_whole(rounded - 360.0)
    } else {
        format_whole(rounded)
    }
}

/// Heading rounded to whole degrees; 360 stays 360 unless `wrap` is set
pub fn format_heading(degrees: f64, wrap: bool) -> String {
    let rounded = degrees.round();
    if wrap {
        format_whole(rounded.rem_euclid(360.0))
    } else {
        format_whole(rounded)
    }
}

/// Converts readouts to display strings
#[derive(Debug, Clone, PartialEq)]
pub struct ReadoutFormatter {
    pub distance_unit_label: String,
    pub wrap_heading: bool,
}

impl Default for ReadoutFormatter {
    fn default() -> Self {
        Self {
            distance_unit_label: DISTANCE_UNIT_LABEL.to_string(),
            wrap_heading: false,
        }
    }
}

impl ReadoutFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            distance_unit_label: config.distance_unit_label.clone(),
            wrap_heading: config.wrap_heading_display,
        }
    }

    pub fn display(&self, readout: &Readout) -> DisplayReadout {
        DisplayReadout {
            latitude: readout
                .device
                .map(|c| format_coordinate_component(c.latitude))
                .unwrap_or_default(),
            longitude: readout
                .device
                .map(|c| format_coordinate_component(c.longitude))
                .unwrap_or_default(),
            distance: readout
                .distance_m
                .map(|d| format_distance(d, &self.distance_unit_label))
                .unwrap_or_default(),
            bearing: readout.bearing_deg.map(format_bearing).unwrap_or_default(),
            heading: readout
                .heading_deg
                .map(|h| format_heading(h, self.wrap_heading))
                .unwrap_or_default(),
        }
    }
}

/// Human-readable text formatter
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    /// Single-line output
    pub compact: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_text(&self, display: &DisplayReadout) -> String {
        let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

        if self.compact {
            format!(
                "Pos: {}, {} | Dist: {} | Brg: {} | Hdg: {}",
                or_dash(&display.latitude),
                or_dash(&display.longitude),
                or_dash(&display.distance),
                or_dash(&display.bearing),
                or_dash(&display.heading),
            )
        } else {
            let mut output = String::new();
            output.push_str(&format!("Latitude:  {}\n", or_dash(&display.latitude)));
            output.push_str(&format!("Longitude: {}\n", or_dash(&display.longitude)));
            output.push_str(&format!("Distance:  {}\n", or_dash(&display.distance)));
            output.push_str(&format!("Bearing:   {}\n", or_dash(&display.bearing)));
            output.push_str(&format!("Heading:   {}\n", or_dash(&display.heading)));
            output
        }
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, display: &DisplayReadout) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(display)
        } else {
            serde_json::to_string(display)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coordinate;

    #[test]
    fn test_coordinate_component_format() {
        assert_eq!(format_coordinate_component(0.0), "0.0");
        assert_eq!(format_coordinate_component(-12.0), "-12.0");
        assert_eq!(format_coordinate_component(47.3769), "47.3769");
        assert_eq!(format_coordinate_component(-122.4194), "-122.4194");
    }

    #[test]
    fn test_distance_format() {
        assert_eq!(format_distance(111194.93, "Meter"), "111195 Meter");
        assert_eq!(format_distance(0.0, "Meter"), "0 Meter");
        assert_eq!(format_distance(0.4, "m"), "0 m");
    }

    #[test]
    fn test_bearing_format_stays_below_360() {
        assert_eq!(format_bearing(90.0), "90");
        assert_eq!(format_bearing(359.4), "359");
        assert_eq!(format_bearing(359.7), "0");
        assert_eq!(format_bearing(0.2), "0");
    }

    #[test]
    fn test_heading_format() {
        assert_eq!(format_heading(359.6, false), "360");
        assert_eq!(format_heading(359.6, true), "0");
        assert_eq!(format_heading(12.5, false), "13");
        assert_eq!(format_heading(0.0, false), "0");
    }

    #[test]
    fn test_empty_readout_has_empty_strings() {
        let display = ReadoutFormatter::new().display(&Readout::default());
        assert_eq!(display, DisplayReadout::default());
    }

    #[test]
    fn test_full_readout() {
        let readout = Readout {
            device: Some(Coordinate::new(0.0, 0.0)),
            distance_m: Some(111194.93),
            bearing_deg: Some(90.0),
            heading_deg: Some(360.0),
        };
        let display = ReadoutFormatter::new().display(&readout);
        assert_eq!(display.latitude, "0.0");
        assert_eq!(display.longitude, "0.0");
        assert_eq!(display.distance, "111195 Meter");
        assert_eq!(display.bearing, "90");
        assert_eq!(display.heading, "360");
    }

    #[test]
    fn test_text_and_json() {
        let display = DisplayReadout {
            latitude: "1.5".to_string(),
            longitude: "2.5".to_string(),
            distance: "10 Meter".to_string(),
            bearing: "45".to_string(),
            heading: String::new(),
        };

        let compact = TextFormatter::compact().format_text(&display);
        assert_eq!(compact, "Pos: 1.5, 2.5 | Dist: 10 Meter | Brg: 45 | Hdg: -");

        let text = TextFormatter::new().format_text(&display);
        assert!(text.contains("Distance:  10 Meter\n"));
        assert!(text.contains("Heading:   -\n"));

        let json = JsonFormatter::new().format_json(&display).unwrap();
        let parsed: DisplayReadout = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, display);
    }
}
