use std::sync::Arc;
use std::time::Duration;

use auth::cors_layer;
use auth::require_caller;
use auth::AccessGuard;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_sensor::create_sensor;
use super::handlers::delete_sensor::delete_sensor;
use super::handlers::get_sensor::get_sensor;
use super::handlers::health::health;
use super::handlers::list_alerts::list_alerts;
use super::handlers::list_hive_sensors::list_hive_sensors;
use super::handlers::list_measurements::list_measurements;
use super::handlers::list_sensors::list_sensors;
use super::handlers::raise_alert::raise_alert;
use super::handlers::record_measurement::record_measurement;
use super::handlers::resolve_alert::resolve_alert;
use super::handlers::sensor_measurements::sensor_measurements;
use super::handlers::sensor_stats::sensor_stats;
use crate::domain::alert::ports::AlertServicePort;
use crate::domain::sensor::ports::SensorServicePort;

#[derive(Clone)]
pub struct AppState {
    pub sensor_service: Arc<dyn SensorServicePort>,
    pub alert_service: Arc<dyn AlertServicePort>,
    pub guard: AccessGuard,
}

pub fn create_router(
    sensor_service: Arc<dyn SensorServicePort>,
    alert_service: Arc<dyn AlertServicePort>,
    guard: AccessGuard,
    allowed_origins: &[String],
) -> Router {
    let state = AppState {
        sensor_service,
        alert_service,
        guard,
    };

    let public_routes = Router::new().route("/health", get(health));

    let protected_routes = Router::new()
        .route("/sensors/", post(create_sensor).get(list_sensors))
        .route("/sensors/:sensor_id", get(get_sensor).delete(delete_sensor))
        .route("/sensors/:sensor_id/stats/", get(sensor_stats))
        .route("/sensors/:sensor_id/measurements/", get(sensor_measurements))
        .route("/hives/:hive_id/sensors/", get(list_hive_sensors))
        .route("/measurements/", post(record_measurement).get(list_measurements))
        .route("/alerts/", post(raise_alert).get(list_alerts))
        .route("/alerts/:alert_id/resolve/", put(resolve_alert))
        .route_layer(middleware::from_fn_with_state(
            state.guard.clone(),
            require_caller,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer(allowed_origins)),
        )
        .with_state(state)
}
