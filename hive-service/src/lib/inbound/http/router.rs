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
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_hive::create_hive;
use super::handlers::delete_hive::delete_hive;
use super::handlers::get_hive::get_hive;
use super::handlers::health::health;
use super::handlers::list_hives::list_hives;
use super::handlers::list_inspections::list_inspections;
use super::handlers::record_inspection::record_inspection;
use super::handlers::update_hive::update_hive;
use crate::domain::hive::ports::HiveServicePort;

#[derive(Clone)]
pub struct AppState {
    pub hive_service: Arc<dyn HiveServicePort>,
    pub guard: AccessGuard,
}

pub fn create_router(
    hive_service: Arc<dyn HiveServicePort>,
    guard: AccessGuard,
    allowed_origins: &[String],
) -> Router {
    let state = AppState {
        hive_service,
        guard,
    };

    let public_routes = Router::new().route("/health", get(health));

    let protected_routes = Router::new()
        .route("/hives/", post(create_hive).get(list_hives))
        .route(
            "/hives/:hive_id",
            get(get_hive).put(update_hive).delete(delete_hive),
        )
        .route("/hives/:hive_id/inspections/", get(list_inspections))
        .route("/inspections/", post(record_inspection))
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
