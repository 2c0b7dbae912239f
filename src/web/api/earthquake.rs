use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::hazard::DepremApiResponse;
use crate::hud::EarthquakeReport;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    post,
    path = "/api/earthquakes",
    tag = "earthquake",
    request_body = DepremApiResponse,
    responses(
        (status = 200, description = "List accepted, previous list replaced", body = EarthquakeReport)
    )
)]
pub async fn push_earthquakes(
    State(state): State<AppState>,
    Json(response): Json<DepremApiResponse>,
) -> ApiResult<Json<EarthquakeReport>> {
    let mut hud = state.hud.lock().await;
    hud.ingest_earthquakes(response.earthquakes, Utc::now());
    hud.earthquakes()
        .map(Json)
        .ok_or(ApiError::NotFound("no_earthquakes"))
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EarthquakeQuery {
    /// Only events within this distance of the rider (km)
    pub max_distance_km: Option<f64>,
    /// Only events with at least this local magnitude
    pub min_magnitude: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/earthquakes",
    tag = "earthquake",
    params(EarthquakeQuery),
    responses(
        (status = 200, description = "Latest list with distances from the rider", body = EarthquakeReport),
        (status = 404, description = "No list received yet", body = ErrorResponse)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EarthquakeQuery>,
) -> ApiResult<Json<EarthquakeReport>> {
    let hud = state.hud.lock().await;
    let mut report = hud
        .earthquakes()
        .ok_or(ApiError::NotFound("no_earthquakes"))?;

    if let Some(max) = query.max_distance_km {
        report.events.retain(|e| e.distance_km <= max);
    }
    if let Some(min) = query.min_magnitude {
        report.events.retain(|e| e.event.magnitude() >= min);
    }
    Ok(Json(report))
}
