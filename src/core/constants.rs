//! Physical constants and display defaults

/// Mean Earth radius used by the haversine distance (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Metres per kilometre
pub const METERS_PER_KM: f64 = 1000.0;

/// Text shown in an empty target field and used when parsing falls back
pub const DEFAULT_COORDINATE_TEXT: &str = "0.0";

/// Value substituted for target text that does not parse
pub const DEFAULT_COORDINATE_VALUE: f64 = 0.0;

/// Unit suffix appended to the distance readout
pub const DISTANCE_UNIT_LABEL: &str = "Meter";

/// Valid latitude range (degrees)
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range (degrees)
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
