use auth::Page;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::PageParams;
use super::TemplateData;
use crate::inbound::http::router::AppState;

pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<Vec<TemplateData>>, ApiError> {
    let page = Page::new(params.skip, params.limit)?;

    state
        .template_service
        .list_templates(page)
        .await
        .map_err(ApiError::from)
        .map(|templates| {
            ApiSuccess::new(StatusCode::OK, templates.iter().map(TemplateData::from).collect())
        })
}
