use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::hud::{replay_track, subscribe, Hud, HudSettings, Subscription};
use crate::telemetry::load_track;

use super::api::earthquake as earthquake_handlers;
use super::api::hazard as hazard_handlers;
use super::api::hud as hud_handlers;
use super::api::telemetry as telemetry_handlers;
use super::api_doc::ApiDoc;
use super::config::{Config, ReplayConfig};
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Telemetry
        .route(
            "/api/telemetry/samples",
            post(telemetry_handlers::push_sample),
        )
        .route(
            "/api/telemetry/velocity",
            get(telemetry_handlers::velocity),
        )
        .route("/api/telemetry/reset", post(telemetry_handlers::reset))
        // Weather and hazard
        .route("/api/weather", post(hazard_handlers::push_weather))
        .route(
            "/api/weather/open-meteo",
            post(hazard_handlers::push_open_meteo),
        )
        .route("/api/hazard", get(hazard_handlers::current))
        .route(
            "/api/hazard/classify",
            get(hazard_handlers::classify_conditions),
        )
        // Earthquakes
        .route("/api/earthquakes", get(earthquake_handlers::list))
        .route(
            "/api/earthquakes",
            post(earthquake_handlers::push_earthquakes),
        )
        // Merged view
        .route("/api/hud", get(hud_handlers::report))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config, settings: HudSettings) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let state = AppState::new(Hud::new(settings));

    let replay = match config.telemetry.replay {
        Some(ref replay_config) => start_replay(replay_config, &state),
        None => None,
    };

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(subscription) = replay {
        let processed = subscription.cancel().await;
        log::info!("Replay cancelled after {} samples", processed);
    }

    result
}

fn start_replay(replay: &ReplayConfig, state: &AppState) -> Option<Subscription> {
    let pace = match replay.pace() {
        Ok(pace) => pace,
        Err(e) => {
            log::warn!("Ignoring replay source: {}", e);
            return None;
        }
    };

    let samples = match load_track(&replay.file) {
        Ok(samples) => samples,
        Err(e) => {
            log::warn!(
                "Failed to load replay track {}: {}",
                replay.file.display(),
                e
            );
            return None;
        }
    };

    log::info!(
        "Replaying {} samples from {}",
        samples.len(),
        replay.file.display()
    );
    let (events, producer) = replay_track(samples, pace);
    Some(subscribe(events, state.hud.clone()).with_source(producer))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Hud::new(HudSettings::default())))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        if bytes.is_empty() {
            return (status, Value::Null);
        }
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn hazard_is_not_found_before_weather() {
        let (status, body) = send(&app(), get_request("/api/hazard")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "no_weather" }));
    }

    #[tokio::test]
    async fn samples_flow_into_hud_report() {
        let app = app();
        let first = json!({
            "latitude": 40.978,
            "longitude": 27.5153,
            "timestamp_ms": 1_700_000_000_000_i64
        });
        let second = json!({
            "latitude": 40.979,
            "longitude": 27.5153,
            "timestamp_ms": 1_700_000_001_000_i64,
            "heading_degrees": 45.0
        });

        let request = json_request("/api/telemetry/samples", first);
        assert_eq!(send(&app, request).await.0, StatusCode::OK);
        let request = json_request("/api/telemetry/samples", second);
        let (status, velocity) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(velocity["heading_label"], "NE (45°)");

        let (status, report) = send(&app, get_request("/api/hud")).await;
        assert_eq!(status, StatusCode::OK);
        let speed = report["velocity"]["speed_kmh"].as_f64().unwrap();
        assert!((speed - 400.30).abs() < 0.01);
        assert_eq!(report["road_condition"]["label"], "dry");
    }

    #[tokio::test]
    async fn classify_reads_query_parameters() {
        let uri = "/api/hazard/classify?temperature_c=-5&wind_kmh=30";
        let (status, body) = send(&app(), get_request(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["road_condition"]["label"], "ice_risk");
        let chill = body["wind_chill_c"].as_f64().unwrap();
        assert!((chill - -12.9967).abs() < 1e-3);
    }

    #[tokio::test]
    async fn invalid_weather_is_a_bad_request() {
        let snapshot = json!({
            "temperature_c": 12.0,
            "precipitation_mm": -1.0,
            "wind_speed_kmh": 10.0,
            "observed_at": "2026-01-12T10:00"
        });
        let request = json_request("/api/weather", snapshot);
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_failed");
    }

    #[tokio::test]
    async fn earthquakes_share_one_path() {
        let app = app();
        let (status, _) = send(&app, get_request("/api/earthquakes")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let payload = json!({ "earthquakes": [{
            "id": 412345,
            "date": "2026.01.12 09:41:07",
            "timestamp": 1768210867,
            "latitude": 40.8125,
            "longitude": 27.9117,
            "depth": 7.2,
            "size": { "md": 0.0, "ml": 3.1, "mw": 0.0 },
            "location": "MARMARA DENIZI"
        }]});
        let request = json_request("/api/earthquakes", payload);
        assert_eq!(send(&app, request).await.0, StatusCode::OK);

        let uri = "/api/earthquakes?max_distance_km=10";
        let (status, body) = send(&app, get_request(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["events"], json!([]));

        let (_, body) = send(&app, get_request("/api/earthquakes")).await;
        assert_eq!(body["events"][0]["event"]["id"], 412345);
    }

    #[tokio::test]
    async fn reset_returns_no_content() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/telemetry/reset")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }
}
