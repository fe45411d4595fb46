use std::fmt;
use std::str::FromStr;

use auth::UserId;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::hive::errors::HiveError;
use crate::domain::hive::errors::HiveNameError;
use crate::domain::hive::errors::HiveStatusError;
use crate::domain::hive::errors::IdError;

/// Hive unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HiveId(pub Uuid);

impl HiveId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(HiveId)
            .map_err(|e| IdError::InvalidFormat(e.to_string()))
    }
}

impl Default for HiveId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InspectionId(pub Uuid);

impl InspectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InspectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InspectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Hive name value type, 1-100 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiveName(String);

impl HiveName {
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name exceeds 100 characters
    pub fn new(name: String) -> Result<Self, HiveNameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(HiveNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(HiveNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Colony health as recorded on the hive or an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HiveStatus {
    #[default]
    Healthy,
    Warning,
    Critical,
}

impl HiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HiveStatus::Healthy => "healthy",
            HiveStatus::Warning => "warning",
            HiveStatus::Critical => "critical",
        }
    }
}

impl FromStr for HiveStatus {
    type Err = HiveStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "healthy" => Ok(HiveStatus::Healthy),
            "warning" => Ok(HiveStatus::Warning),
            "critical" => Ok(HiveStatus::Critical),
            other => Err(HiveStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for HiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hive aggregate entity, owned by exactly one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hive {
    pub id: HiveId,
    pub owner_id: UserId,
    pub name: HiveName,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: HiveStatus,
    pub queen_year: Option<i32>,
    pub frames_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A recorded visit to a hive.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub id: InspectionId,
    pub hive_id: HiveId,
    pub owner_id: UserId,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<HiveStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Inspection aggregates for one hive, computed at read time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HiveStats {
    pub avg_temperature: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_weight: Option<f64>,
    pub last_inspection_date: Option<DateTime<Utc>>,
    /// Status of the most recent inspection that recorded one.
    pub latest_status: Option<HiveStatus>,
}

/// Read-only detail view: the stored hive plus its inspection statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct HiveWithStats {
    pub hive: Hive,
    pub status: HiveStatus,
    pub avg_temperature: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_weight: Option<f64>,
    pub last_inspection_date: Option<DateTime<Utc>>,
}

impl HiveWithStats {
    pub fn new(hive: Hive, stats: HiveStats) -> Self {
        Self {
            status: stats.latest_status.unwrap_or(hive.status),
            hive,
            avg_temperature: stats.avg_temperature,
            avg_humidity: stats.avg_humidity,
            avg_weight: stats.avg_weight,
            last_inspection_date: stats.last_inspection_date,
        }
    }
}

fn check_frames_count(frames_count: Option<i32>) -> Result<Option<i32>, HiveError> {
    match frames_count {
        Some(count) if count < 0 => Err(HiveError::NegativeFramesCount(count)),
        other => Ok(other),
    }
}

/// Command to create a hive
#[derive(Debug, Clone)]
pub struct CreateHiveCommand {
    pub name: HiveName,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<HiveStatus>,
    pub queen_year: Option<i32>,
    pub frames_count: Option<i32>,
}

impl CreateHiveCommand {
    /// # Errors
    /// * `NegativeFramesCount` - `frames_count` below zero
    pub fn new(
        name: HiveName,
        location: Option<String>,
        description: Option<String>,
        status: Option<HiveStatus>,
        queen_year: Option<i32>,
        frames_count: Option<i32>,
    ) -> Result<Self, HiveError> {
        Ok(Self {
            name,
            location,
            description,
            status,
            queen_year,
            frames_count: check_frames_count(frames_count)?,
        })
    }
}

/// Partial hive update. Only provided fields change.
#[derive(Debug, Clone, Default)]
pub struct UpdateHiveCommand {
    pub name: Option<HiveName>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<HiveStatus>,
    pub queen_year: Option<i32>,
    pub frames_count: Option<i32>,
}

impl UpdateHiveCommand {
    pub fn validated(self) -> Result<Self, HiveError> {
        check_frames_count(self.frames_count)?;
        Ok(self)
    }

    pub fn apply(self, hive: &mut Hive) {
        if let Some(name) = self.name {
            hive.name = name;
        }
        if let Some(location) = self.location {
            hive.location = Some(location);
        }
        if let Some(description) = self.description {
            hive.description = Some(description);
        }
        if let Some(status) = self.status {
            hive.status = status;
        }
        if let Some(queen_year) = self.queen_year {
            hive.queen_year = Some(queen_year);
        }
        if let Some(frames_count) = self.frames_count {
            hive.frames_count = Some(frames_count);
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordInspectionCommand {
    pub hive_id: HiveId,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<HiveStatus>,
}
