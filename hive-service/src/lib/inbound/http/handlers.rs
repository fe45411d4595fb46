use auth::AccessError;
use auth::Page;
use auth::PageError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::Hive;
use crate::domain::hive::models::HiveWithStats;
use crate::domain::hive::models::Inspection;

pub mod create_hive;
pub mod delete_hive;
pub mod get_hive;
pub mod health;
pub mod list_hives;
pub mod list_inspections;
pub mod record_inspection;
pub mod update_hive;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Access(AccessError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Access(err) => return err.into_response(),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
        };

        (status, Json(ApiResponseBody::new_error(status, kind, message))).into_response()
    }
}

impl From<HiveError> for ApiError {
    fn from(err: HiveError) -> Self {
        match err {
            HiveError::NotFound(_) => ApiError::NotFound(err.to_string()),
            HiveError::Access(access) => ApiError::Access(access),
            HiveError::InvalidId(_)
            | HiveError::InvalidName(_)
            | HiveError::InvalidStatus(_)
            | HiveError::NegativeFramesCount(_)
            | HiveError::InvalidPage(_) => ApiError::UnprocessableEntity(err.to_string()),
            HiveError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        ApiError::from(HiveError::from(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, kind: &'static str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { kind, message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl TryFrom<PageParams> for Page {
    type Error = PageError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        Page::new(params.skip, params.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiveData {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: &'static str,
    pub queen_year: Option<i32>,
    pub frames_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Hive> for HiveData {
    fn from(hive: &Hive) -> Self {
        Self {
            id: hive.id.to_string(),
            owner_id: hive.owner_id.to_string(),
            name: hive.name.as_str().to_string(),
            location: hive.location.clone(),
            description: hive.description.clone(),
            status: hive.status.as_str(),
            queen_year: hive.queen_year,
            frames_count: hive.frames_count,
            created_at: hive.created_at,
            updated_at: hive.updated_at,
        }
    }
}

/// Hive detail: the stored fields with `status` replaced by the derived one,
/// plus inspection averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HiveDetailData {
    #[serde(flatten)]
    pub hive: HiveData,
    pub avg_temperature: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_weight: Option<f64>,
    pub last_inspection_date: Option<DateTime<Utc>>,
}

impl From<&HiveWithStats> for HiveDetailData {
    fn from(view: &HiveWithStats) -> Self {
        let mut hive = HiveData::from(&view.hive);
        hive.status = view.status.as_str();

        Self {
            hive,
            avg_temperature: view.avg_temperature,
            avg_humidity: view.avg_humidity,
            avg_weight: view.avg_weight,
            last_inspection_date: view.last_inspection_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionData {
    pub id: String,
    pub hive_id: String,
    pub owner_id: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<&'static str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Inspection> for InspectionData {
    fn from(inspection: &Inspection) -> Self {
        Self {
            id: inspection.id.to_string(),
            hive_id: inspection.hive_id.to_string(),
            owner_id: inspection.owner_id.to_string(),
            temperature: inspection.temperature,
            humidity: inspection.humidity,
            weight: inspection.weight,
            notes: inspection.notes.clone(),
            status: inspection.status.map(|s| s.as_str()),
            created_at: inspection.created_at,
            updated_at: inspection.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}
