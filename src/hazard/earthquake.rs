use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::telemetry::{haversine_km, Coordinate};

/// deprem-api ids are numeric for some catalogues and strings for others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Number(n) => write!(f, "{}", n),
            EventId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Magnitude {
    #[serde(default)]
    pub md: f64,
    pub ml: f64,
    #[serde(default)]
    pub mw: f64,
}

/// One event as published by deprem-api.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EarthquakeEvent {
    pub id: EventId,
    pub date: String,
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Hypocentre depth (km)
    pub depth: f64,
    pub size: Magnitude,
    pub location: String,
    #[serde(default)]
    pub attribute: Option<String>,
}

impl EarthquakeEvent {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Local magnitude, the one the HUD displays.
    pub fn magnitude(&self) -> f64 {
        self.size.ml
    }
}

/// deprem-api response body; only the event list is used.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DepremApiResponse {
    pub earthquakes: Vec<EarthquakeEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NearbyEarthquake {
    pub event: EarthquakeEvent,
    pub distance_km: f64,
}

/// Pairs every event with its distance from `from`, keeping feed order.
pub fn nearby(events: &[EarthquakeEvent], from: Coordinate) -> Vec<NearbyEarthquake> {
    events
        .iter()
        .map(|event| NearbyEarthquake {
            distance_km: haversine_km(from, event.coordinate()),
            event: event.clone(),
        })
        .collect()
}
