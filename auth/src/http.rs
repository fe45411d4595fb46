use std::time::Duration;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use tower_http::cors::AllowHeaders;
use tower_http::cors::AllowMethods;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;

use crate::errors::AccessError;
use crate::guard::AccessGuard;

const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

/// Middleware that admits the bearer of the request's token and stores the
/// resulting `Caller` in the request extensions.
///
/// Mount with `route_layer(middleware::from_fn_with_state(guard, require_caller))`.
pub async fn require_caller(
    State(guard): State<AccessGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccessError> {
    let token = bearer_token(&req)?;
    let caller = guard.admit(token).await?;

    tracing::debug!(username = %caller.username, "Caller admitted");
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Result<&str, AccessError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AccessError::Unauthenticated("missing bearer token".to_string()))?
        .to_str()
        .map_err(|_| AccessError::Unauthenticated("invalid authorization header".to_string()))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AccessError::Unauthenticated(
            "expected: Bearer <token>".to_string(),
        )),
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AccessError::DirectoryUnavailable(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "status_code": status.as_u16(),
            "data": {
                "kind": self.kind(),
                "message": message,
            }
        }));

        let mut response = (status, body).into_response();
        if matches!(self, AccessError::Unauthenticated(_)) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Cross-origin policy shared by all services: listed origins only,
/// credentials allowed, methods and headers mirrored from the preflight.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(CORS_MAX_AGE)
}
