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

use super::handlers::create_notification::create_notification;
use super::handlers::create_settings::create_settings;
use super::handlers::create_template::create_template;
use super::handlers::get_my_settings::get_my_settings;
use super::handlers::health::health;
use super::handlers::list_notifications::list_notifications;
use super::handlers::list_pending::list_pending;
use super::handlers::list_templates::list_templates;
use super::handlers::mark_sent::mark_sent;
use super::handlers::update_my_settings::update_my_settings;
use crate::domain::notification::ports::NotificationServicePort;
use crate::domain::settings::ports::SettingsServicePort;
use crate::domain::template::ports::TemplateServicePort;

#[derive(Clone)]
pub struct AppState {
    pub template_service: Arc<dyn TemplateServicePort>,
    pub settings_service: Arc<dyn SettingsServicePort>,
    pub notification_service: Arc<dyn NotificationServicePort>,
    pub guard: AccessGuard,
}

pub fn create_router(
    template_service: Arc<dyn TemplateServicePort>,
    settings_service: Arc<dyn SettingsServicePort>,
    notification_service: Arc<dyn NotificationServicePort>,
    guard: AccessGuard,
    allowed_origins: &[String],
) -> Router {
    let state = AppState {
        template_service,
        settings_service,
        notification_service,
        guard,
    };

    let public_routes = Router::new().route("/health", get(health));

    let protected_routes = Router::new()
        .route("/templates/", post(create_template).get(list_templates))
        .route("/settings/", post(create_settings))
        .route("/settings/me/", get(get_my_settings).put(update_my_settings))
        .route(
            "/notifications/",
            post(create_notification).get(list_notifications),
        )
        .route("/notifications/pending/", get(list_pending))
        .route("/notifications/:notification_id/sent/", put(mark_sent))
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
