use axum::{extract::State, http::StatusCode, Json};

use crate::telemetry::{DerivedVelocity, PositionSample};
use crate::web::api::error::ApiResult;
use crate::web::state::AppState;

#[utoipa::path(
    post,
    path = "/api/telemetry/samples",
    tag = "telemetry",
    request_body = PositionSample,
    responses(
        (status = 200, description = "Velocity derived from the sample", body = DerivedVelocity)
    )
)]
pub async fn push_sample(
    State(state): State<AppState>,
    Json(sample): Json<PositionSample>,
) -> ApiResult<Json<DerivedVelocity>> {
    let mut hud = state.hud.lock().await;
    Ok(Json(hud.ingest_position(sample)))
}

#[utoipa::path(
    get,
    path = "/api/telemetry/velocity",
    tag = "telemetry",
    responses(
        (status = 200, description = "Latest derived velocity", body = DerivedVelocity)
    )
)]
pub async fn velocity(State(state): State<AppState>) -> ApiResult<Json<DerivedVelocity>> {
    let hud = state.hud.lock().await;
    Ok(Json(hud.velocity().clone()))
}

#[utoipa::path(
    post,
    path = "/api/telemetry/reset",
    tag = "telemetry",
    responses(
        (status = 204, description = "HUD session reset")
    )
)]
pub async fn reset(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.hud.lock().await.reset();
    log::info!("HUD session reset");
    Ok(StatusCode::NO_CONTENT)
}
