use auth::Caller;
use auth::Page;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::HiveData;
use super::PageParams;
use crate::inbound::http::router::AppState;

pub async fn list_hives(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<Vec<HiveData>>, ApiError> {
    let page = Page::try_from(params)?;

    state
        .hive_service
        .list_hives(&caller, page)
        .await
        .map_err(ApiError::from)
        .map(|hives| ApiSuccess::new(StatusCode::OK, hives.iter().map(HiveData::from).collect()))
}
