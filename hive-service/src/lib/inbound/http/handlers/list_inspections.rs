use auth::Caller;
use auth::Page;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::InspectionData;
use super::PageParams;
use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::HiveId;
use crate::inbound::http::router::AppState;

pub async fn list_inspections(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<Vec<InspectionData>>, ApiError> {
    let hive_id = HiveId::from_string(&id).map_err(HiveError::from)?;
    let page = Page::try_from(params)?;

    state
        .hive_service
        .list_inspections(&caller, &hive_id, page)
        .await
        .map_err(ApiError::from)
        .map(|inspections| {
            ApiSuccess::new(
                StatusCode::OK,
                inspections.iter().map(InspectionData::from).collect(),
            )
        })
}
