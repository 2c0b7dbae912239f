use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::geo::Coordinate;
use super::heading::HEADING_UNKNOWN;

/// One reported device position, as delivered by the platform location
/// stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PositionSample {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instantaneous_speed_mps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_degrees: Option<f64>,
}

impl PositionSample {
    pub fn new(latitude: f64, longitude: f64, timestamp_ms: i64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp_ms,
            instantaneous_speed_mps: None,
            heading_degrees: None,
        }
    }

    pub fn with_speed_mps(mut self, speed: f64) -> Self {
        self.instantaneous_speed_mps = Some(speed);
        self
    }

    pub fn with_heading(mut self, degrees: f64) -> Self {
        self.heading_degrees = Some(degrees);
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn has_valid_fix(&self) -> bool {
        self.coordinate().is_valid()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DerivedVelocity {
    pub speed_kmh: f64,
    pub heading_label: String,
}

impl Default for DerivedVelocity {
    fn default() -> Self {
        Self {
            speed_kmh: 0.0,
            heading_label: HEADING_UNKNOWN.to_string(),
        }
    }
}
