use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::WeatherError;
use super::road_condition::{classify, RoadCondition};
use super::wind_chill::wind_chill;
use crate::telemetry::Coordinate;

/// One complete weather observation. A new snapshot replaces the previous
/// one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub wind_speed_kmh: f64,
    #[serde(default)]
    pub wind_direction_degrees: Option<f64>,
    #[serde(default)]
    pub apparent_temperature_c: Option<f64>,
    #[serde(default)]
    pub humidity_pct: Option<f64>,
    #[serde(default)]
    pub cloud_cover_pct: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<u32>,
    #[serde(default)]
    pub location: Option<Coordinate>,
    pub observed_at: String,
}

impl WeatherSnapshot {
    pub fn validate(&self) -> Result<(), WeatherError> {
        if !self.temperature_c.is_finite() {
            return Err(WeatherError::InvalidTemperature(self.temperature_c));
        }
        if !(self.precipitation_mm.is_finite() && self.precipitation_mm >= 0.0) {
            return Err(WeatherError::InvalidPrecipitation(self.precipitation_mm));
        }
        if !(self.wind_speed_kmh.is_finite() && self.wind_speed_kmh >= 0.0) {
            return Err(WeatherError::InvalidWindSpeed(self.wind_speed_kmh));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HazardAssessment {
    pub road_condition: RoadCondition,
    pub wind_chill_c: f64,
}

pub fn assess(snapshot: &WeatherSnapshot) -> HazardAssessment {
    HazardAssessment {
        road_condition: classify(
            snapshot.temperature_c,
            snapshot.precipitation_mm,
            snapshot.wind_speed_kmh,
        ),
        wind_chill_c: wind_chill(snapshot.temperature_c, snapshot.wind_speed_kmh),
    }
}

/// Open-Meteo `/v1/forecast` response, reduced to the `current` block the
/// HUD requests.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OpenMeteoResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub current: OpenMeteoCurrent,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OpenMeteoCurrent {
    pub time: String,
    pub temperature_2m: f64,
    pub wind_speed_10m: f64,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<u32>,
    #[serde(default)]
    pub wind_direction_10m: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
}

impl From<OpenMeteoResponse> for WeatherSnapshot {
    fn from(response: OpenMeteoResponse) -> Self {
        let current = response.current;
        WeatherSnapshot {
            temperature_c: current.temperature_2m,
            precipitation_mm: current.precipitation.unwrap_or(0.0),
            wind_speed_kmh: current.wind_speed_10m,
            wind_direction_degrees: current.wind_direction_10m,
            apparent_temperature_c: current.apparent_temperature,
            humidity_pct: current.relative_humidity_2m,
            cloud_cover_pct: current.cloud_cover,
            weather_code: current.weather_code,
            location: Some(Coordinate::new(response.latitude, response.longitude)),
            observed_at: current.time,
        }
    }
}
