use auth::Caller;
use auth::Page;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::NotificationData;
use super::PageParams;
use crate::inbound::http::router::AppState;

pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<Vec<NotificationData>>, ApiError> {
    let page = Page::new(params.skip, params.limit)?;

    state
        .notification_service
        .list_notifications(&caller, page)
        .await
        .map_err(ApiError::from)
        .map(|notifications| {
            ApiSuccess::new(
                StatusCode::OK,
                notifications.iter().map(NotificationData::from).collect(),
            )
        })
}
