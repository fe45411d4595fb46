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

use super::handlers::change_password::change_password;
use super::handlers::get_current_user::get_current_user;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::issue_token::issue_token;
use super::handlers::list_users::list_users;
use super::handlers::register_user::register_user;
use super::handlers::update_user::update_user;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub guard: AccessGuard,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    guard: AccessGuard,
    allowed_origins: &[String],
) -> Router {
    let state = AppState {
        user_service,
        guard,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/token", post(issue_token))
        .route("/users/", post(register_user));

    let protected_routes = Router::new()
        .route("/users/", get(list_users))
        .route("/users/me", get(get_current_user))
        .route("/users/:user_id", get(get_user).put(update_user))
        .route("/change-password", post(change_password))
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
