use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::hazard::{
    assess, classify, nearby, EarthquakeEvent, HazardAssessment, NearbyEarthquake, RoadCondition,
    WeatherError, WeatherSnapshot,
};
use crate::telemetry::{BaselinePolicy, Coordinate, DerivedVelocity, Estimator, PositionSample};

pub const DEFAULT_LOCATION: Coordinate = Coordinate {
    latitude_deg: 40.978,
    longitude_deg: 27.5153,
};

#[derive(Debug, Clone, Copy)]
pub struct HudSettings {
    pub default_location: Coordinate,
    pub weather_stale_after: Duration,
    pub baseline_policy: BaselinePolicy,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION,
            weather_stale_after: Duration::minutes(30),
            baseline_policy: BaselinePolicy::Always,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PositionFix {
    pub position: Coordinate,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct WeatherReading {
    snapshot: WeatherSnapshot,
    received_at: DateTime<Utc>,
    assessment: HazardAssessment,
}

#[derive(Debug, Clone)]
struct EarthquakeReading {
    events: Vec<EarthquakeEvent>,
    received_at: DateTime<Utc>,
}

/// Everything the presentation layer needs, ready to render.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HudReport {
    pub velocity: DerivedVelocity,
    pub position: Coordinate,
    pub last_fix: Option<PositionFix>,
    pub weather: Option<WeatherSnapshot>,
    pub weather_received_at: Option<DateTime<Utc>>,
    pub weather_stale: bool,
    pub wind_chill_c: Option<f64>,
    pub road_condition: RoadCondition,
}

/// Latest earthquake list, measured from the rider's current position.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EarthquakeReport {
    pub origin: Coordinate,
    pub received_at: DateTime<Utc>,
    pub events: Vec<NearbyEarthquake>,
}

/// One logical HUD session. The position and weather pipelines update
/// independently; each new value supersedes the previous one.
#[derive(Debug)]
pub struct Hud {
    settings: HudSettings,
    estimator: Estimator,
    velocity: DerivedVelocity,
    last_fix: Option<PositionFix>,
    weather: Option<WeatherReading>,
    earthquakes: Option<EarthquakeReading>,
}

impl Hud {
    pub fn new(settings: HudSettings) -> Self {
        Self {
            settings,
            estimator: Estimator::new(settings.baseline_policy),
            velocity: DerivedVelocity::default(),
            last_fix: None,
            weather: None,
            earthquakes: None,
        }
    }

    pub fn velocity(&self) -> &DerivedVelocity {
        &self.velocity
    }

    pub fn ingest_position(&mut self, sample: PositionSample) -> DerivedVelocity {
        let fix = if sample.has_valid_fix() {
            DateTime::from_timestamp_millis(sample.timestamp_ms).map(|timestamp| PositionFix {
                position: sample.coordinate(),
                timestamp,
            })
        } else {
            None
        };

        let velocity = self.estimator.push(sample);
        log::debug!(
            "Derived {:.1} km/h, {}",
            velocity.speed_kmh,
            velocity.heading_label
        );

        if fix.is_some() {
            self.last_fix = fix;
        }
        self.velocity = velocity.clone();
        velocity
    }

    /// A rejected snapshot leaves the previous reading in place.
    pub fn ingest_weather(
        &mut self,
        snapshot: WeatherSnapshot,
        received_at: DateTime<Utc>,
    ) -> Result<HazardAssessment, WeatherError> {
        snapshot.validate()?;

        let assessment = assess(&snapshot);
        log::info!(
            "Weather at {}: {} ({:.1} °C, {:.1} mm, {:.0} km/h)",
            snapshot.observed_at,
            assessment.road_condition.label,
            snapshot.temperature_c,
            snapshot.precipitation_mm,
            snapshot.wind_speed_kmh
        );

        self.weather = Some(WeatherReading {
            snapshot,
            received_at,
            assessment: assessment.clone(),
        });
        Ok(assessment)
    }

    pub fn hazard(&self) -> Option<&HazardAssessment> {
        self.weather.as_ref().map(|w| &w.assessment)
    }

    /// Replaces the previous earthquake list. Returns how many events were kept.
    pub fn ingest_earthquakes(
        &mut self,
        events: Vec<EarthquakeEvent>,
        received_at: DateTime<Utc>,
    ) -> usize {
        let total = events.len();
        let events: Vec<_> = events
            .into_iter()
            .filter(|event| event.coordinate().is_valid())
            .collect();
        if events.len() < total {
            log::warn!(
                "Dropped {} earthquake events without a valid location",
                total - events.len()
            );
        }
        log::info!("Earthquake list updated: {} events", events.len());

        let kept = events.len();
        self.earthquakes = Some(EarthquakeReading {
            events,
            received_at,
        });
        kept
    }

    pub fn earthquakes(&self) -> Option<EarthquakeReport> {
        let reading = self.earthquakes.as_ref()?;
        let origin = self.position();
        Some(EarthquakeReport {
            origin,
            received_at: reading.received_at,
            events: nearby(&reading.events, origin),
        })
    }

    /// Last fix, or the configured default location before the first one.
    pub fn position(&self) -> Coordinate {
        self.last_fix
            .as_ref()
            .map(|fix| fix.position)
            .unwrap_or(self.settings.default_location)
    }

    pub fn report(&self, now: DateTime<Utc>) -> HudReport {
        let road_condition = self
            .weather
            .as_ref()
            .map(|w| w.assessment.road_condition.clone())
            .unwrap_or_else(initial_road_condition);

        HudReport {
            velocity: self.velocity.clone(),
            position: self.position(),
            last_fix: self.last_fix.clone(),
            weather: self.weather.as_ref().map(|w| w.snapshot.clone()),
            weather_received_at: self.weather.as_ref().map(|w| w.received_at),
            weather_stale: self
                .weather
                .as_ref()
                .is_some_and(|w| now - w.received_at > self.settings.weather_stale_after),
            wind_chill_c: self.weather.as_ref().map(|w| w.assessment.wind_chill_c),
            road_condition,
        }
    }

    /// Start a new logical session with the same settings.
    pub fn reset(&mut self) {
        *self = Hud::new(self.settings);
    }
}

fn initial_road_condition() -> RoadCondition {
    classify(12.0, 0.0, 10.0)
}
