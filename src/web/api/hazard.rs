use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::hazard::{classify, wind_chill, HazardAssessment, OpenMeteoResponse, WeatherSnapshot};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    post,
    path = "/api/weather",
    tag = "hazard",
    request_body = WeatherSnapshot,
    responses(
        (status = 200, description = "Snapshot accepted", body = HazardAssessment),
        (status = 400, description = "Snapshot rejected, previous values kept", body = ErrorResponse)
    )
)]
pub async fn push_weather(
    State(state): State<AppState>,
    Json(snapshot): Json<WeatherSnapshot>,
) -> ApiResult<Json<HazardAssessment>> {
    ingest(&state, snapshot).await
}

#[utoipa::path(
    post,
    path = "/api/weather/open-meteo",
    tag = "hazard",
    request_body = OpenMeteoResponse,
    responses(
        (status = 200, description = "Open-Meteo current conditions accepted", body = HazardAssessment),
        (status = 400, description = "Snapshot rejected, previous values kept", body = ErrorResponse)
    )
)]
pub async fn push_open_meteo(
    State(state): State<AppState>,
    Json(response): Json<OpenMeteoResponse>,
) -> ApiResult<Json<HazardAssessment>> {
    ingest(&state, WeatherSnapshot::from(response)).await
}

async fn ingest(state: &AppState, snapshot: WeatherSnapshot) -> ApiResult<Json<HazardAssessment>> {
    let mut hud = state.hud.lock().await;
    match hud.ingest_weather(snapshot, Utc::now()) {
        Ok(assessment) => Ok(Json(assessment)),
        Err(e) => {
            log::warn!("Rejected weather snapshot: {}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/hazard",
    tag = "hazard",
    responses(
        (status = 200, description = "Assessment of the latest snapshot", body = HazardAssessment),
        (status = 404, description = "No snapshot received yet", body = ErrorResponse)
    )
)]
pub async fn current(State(state): State<AppState>) -> ApiResult<Json<HazardAssessment>> {
    let hud = state.hud.lock().await;
    hud.hazard()
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("no_weather"))
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassifyQuery {
    /// Air temperature (°C)
    pub temperature_c: f64,
    /// Precipitation (mm)
    #[serde(default)]
    pub precipitation_mm: f64,
    /// Wind speed (km/h)
    #[serde(default)]
    pub wind_kmh: f64,
}

#[utoipa::path(
    get,
    path = "/api/hazard/classify",
    tag = "hazard",
    params(ClassifyQuery),
    responses(
        (status = 200, description = "Stateless road condition and wind chill", body = HazardAssessment),
        (status = 400, description = "Invalid parameters")
    )
)]
pub async fn classify_conditions(
    Query(query): Query<ClassifyQuery>,
) -> ApiResult<Json<HazardAssessment>> {
    Ok(Json(HazardAssessment {
        road_condition: classify(query.temperature_c, query.precipitation_mm, query.wind_kmh),
        wind_chill_c: wind_chill(query.temperature_c, query.wind_kmh),
    }))
}
