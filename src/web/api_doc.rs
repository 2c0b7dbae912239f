use utoipa::OpenApi;

use super::api::earthquake::EarthquakeQuery;
use super::api::error::ErrorResponse;
use super::api::hazard::ClassifyQuery;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::telemetry::push_sample,
        super::api::telemetry::velocity,
        super::api::telemetry::reset,
        super::api::hazard::push_weather,
        super::api::hazard::push_open_meteo,
        super::api::hazard::current,
        super::api::hazard::classify_conditions,
        super::api::hud::report,
        super::api::earthquake::push_earthquakes,
        super::api::earthquake::list,
    ),
    components(
        schemas(
            ErrorResponse,
            ClassifyQuery,
            EarthquakeQuery,
            crate::telemetry::PositionSample,
            crate::telemetry::DerivedVelocity,
            crate::telemetry::Coordinate,
            crate::hazard::WeatherSnapshot,
            crate::hazard::OpenMeteoResponse,
            crate::hazard::OpenMeteoCurrent,
            crate::hazard::HazardAssessment,
            crate::hazard::RoadCondition,
            crate::hazard::RoadLabel,
            crate::hazard::Tone,
            crate::hud::HudReport,
            crate::hud::PositionFix,
            crate::hud::EarthquakeReport,
            crate::hazard::DepremApiResponse,
            crate::hazard::EarthquakeEvent,
            crate::hazard::EventId,
            crate::hazard::Magnitude,
            crate::hazard::NearbyEarthquake,
        )
    ),
    info(
        title = "Moto HUD API",
        description = "Speed, heading, road hazard and earthquake telemetry for a motorcycle HUD",
        version = "0.1.0"
    ),
    tags(
        (name = "telemetry", description = "Position samples and derived velocity"),
        (name = "hazard", description = "Weather snapshots, wind chill and road condition"),
        (name = "hud", description = "Merged HUD view"),
        (name = "earthquake", description = "Recent earthquakes around the rider")
    )
)]
pub struct ApiDoc;
