use async_trait::async_trait;
use auth::Caller;
use auth::Page;
use auth::UserId;

use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::CreateHiveCommand;
use crate::domain::hive::models::Hive;
use crate::domain::hive::models::HiveId;
use crate::domain::hive::models::HiveStats;
use crate::domain::hive::models::HiveWithStats;
use crate::domain::hive::models::Inspection;
use crate::domain::hive::models::RecordInspectionCommand;
use crate::domain::hive::models::UpdateHiveCommand;

/// Port for hive domain service operations.
#[async_trait]
pub trait HiveServicePort: Send + Sync + 'static {
    /// Create a hive owned by the caller.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_hive(&self, caller: &Caller, command: CreateHiveCommand)
        -> Result<Hive, HiveError>;

    /// The caller's hives, oldest first.
    async fn list_hives(&self, caller: &Caller, page: Page) -> Result<Vec<Hive>, HiveError>;

    /// A hive together with statistics over its inspections.
    ///
    /// # Errors
    /// * `NotFound` - Hive does not exist
    /// * `Access(Forbidden)` - Hive belongs to someone else
    async fn get_hive(&self, caller: &Caller, id: &HiveId) -> Result<HiveWithStats, HiveError>;

    /// # Errors
    /// * `NotFound` - Hive does not exist
    /// * `Access(Forbidden)` - Hive belongs to someone else
    async fn update_hive(
        &self,
        caller: &Caller,
        id: &HiveId,
        command: UpdateHiveCommand,
    ) -> Result<Hive, HiveError>;

    /// Delete a hive and, through the storage layer, everything recorded against it.
    ///
    /// # Errors
    /// * `NotFound` - Hive does not exist
    /// * `Access(Forbidden)` - Hive belongs to someone else
    async fn delete_hive(&self, caller: &Caller, id: &HiveId) -> Result<(), HiveError>;

    /// Record an inspection; its status, when present, becomes the hive's status.
    ///
    /// # Errors
    /// * `NotFound` - Hive does not exist or belongs to someone else
    async fn record_inspection(
        &self,
        caller: &Caller,
        command: RecordInspectionCommand,
    ) -> Result<Inspection, HiveError>;

    /// Inspections of one of the caller's hives, newest first.
    ///
    /// # Errors
    /// * `NotFound` - Hive does not exist or belongs to someone else
    async fn list_inspections(
        &self,
        caller: &Caller,
        hive_id: &HiveId,
        page: Page,
    ) -> Result<Vec<Inspection>, HiveError>;
}

/// Persistence operations for hives and inspections.
#[async_trait]
pub trait HiveRepository: Send + Sync + 'static {
    async fn create_hive(&self, hive: Hive) -> Result<Hive, HiveError>;

    async fn find_hive(&self, id: &HiveId) -> Result<Option<Hive>, HiveError>;

    async fn list_hives_by_owner(&self, owner_id: &UserId, page: Page)
        -> Result<Vec<Hive>, HiveError>;

    /// # Errors
    /// * `NotFound` - Hive does not exist
    async fn update_hive(&self, hive: Hive) -> Result<Hive, HiveError>;

    /// # Errors
    /// * `NotFound` - Hive does not exist
    async fn delete_hive(&self, id: &HiveId) -> Result<(), HiveError>;

    async fn hive_stats(&self, id: &HiveId) -> Result<HiveStats, HiveError>;

    /// Insert the inspection and, if it carries a status, copy it onto the hive
    /// in the same transaction.
    async fn create_inspection(&self, inspection: Inspection) -> Result<Inspection, HiveError>;

    async fn list_inspections(&self, hive_id: &HiveId, page: Page)
        -> Result<Vec<Inspection>, HiveError>;
}
