use axum::{extract::State, Json};
use chrono::Utc;

use crate::hud::HudReport;
use crate::web::api::error::ApiResult;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/hud",
    tag = "hud",
    responses(
        (status = 200, description = "Current HUD values, last known on upstream failure", body = HudReport)
    )
)]
pub async fn report(State(state): State<AppState>) -> ApiResult<Json<HudReport>> {
    let hud = state.hud.lock().await;
    Ok(Json(hud.report(Utc::now())))
}
