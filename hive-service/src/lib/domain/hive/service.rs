use std::sync::Arc;

use async_trait::async_trait;
use auth::Caller;
use auth::Page;
use chrono::Utc;

use crate::domain::hive::errors::HiveError;
use crate::domain::hive::models::CreateHiveCommand;
use crate::domain::hive::models::Hive;
use crate::domain::hive::models::HiveId;
use crate::domain::hive::models::HiveWithStats;
use crate::domain::hive::models::Inspection;
use crate::domain::hive::models::InspectionId;
use crate::domain::hive::models::RecordInspectionCommand;
use crate::domain::hive::models::UpdateHiveCommand;
use crate::domain::hive::ports::HiveRepository;
use crate::domain::hive::ports::HiveServicePort;

/// Domain service implementation for hive operations.
pub struct HiveService<HR>
where
    HR: HiveRepository,
{
    repository: Arc<HR>,
}

impl<HR> HiveService<HR>
where
    HR: HiveRepository,
{
    pub fn new(repository: Arc<HR>) -> Self {
        Self { repository }
    }

    /// Load a hive the caller is operating on directly; someone else's hive is Forbidden.
    async fn load_owned(&self, caller: &Caller, id: &HiveId) -> Result<Hive, HiveError> {
        let hive = self
            .repository
            .find_hive(id)
            .await?
            .ok_or_else(|| HiveError::NotFound(id.to_string()))?;

        caller.ensure_owner(hive.owner_id)?;
        Ok(hive)
    }

    /// Resolve a hive referenced from another request; someone else's hive is NotFound.
    async fn load_referenced(&self, caller: &Caller, id: &HiveId) -> Result<Hive, HiveError> {
        match self.repository.find_hive(id).await? {
            Some(hive) if caller.owns(hive.owner_id) => Ok(hive),
            _ => Err(HiveError::NotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl<HR> HiveServicePort for HiveService<HR>
where
    HR: HiveRepository,
{
    async fn create_hive(
        &self,
        caller: &Caller,
        command: CreateHiveCommand,
    ) -> Result<Hive, HiveError> {
        let hive = Hive {
            id: HiveId::new(),
            owner_id: caller.id,
            name: command.name,
            location: command.location,
            description: command.description,
            status: command.status.unwrap_or_default(),
            queen_year: command.queen_year,
            frames_count: command.frames_count,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.repository.create_hive(hive).await?;
        tracing::info!(hive_id = %created.id, owner_id = %caller.id, "Hive created");

        Ok(created)
    }

    async fn list_hives(&self, caller: &Caller, page: Page) -> Result<Vec<Hive>, HiveError> {
        self.repository.list_hives_by_owner(&caller.id, page).await
    }

    async fn get_hive(&self, caller: &Caller, id: &HiveId) -> Result<HiveWithStats, HiveError> {
        let hive = self.load_owned(caller, id).await?;
        let stats = self.repository.hive_stats(id).await?;

        Ok(HiveWithStats::new(hive, stats))
    }

    async fn update_hive(
        &self,
        caller: &Caller,
        id: &HiveId,
        command: UpdateHiveCommand,
    ) -> Result<Hive, HiveError> {
        let mut hive = self.load_owned(caller, id).await?;

        command.apply(&mut hive);
        hive.updated_at = Some(Utc::now());

        let updated = self.repository.update_hive(hive).await?;
        tracing::info!(hive_id = %updated.id, "Hive updated");

        Ok(updated)
    }

    async fn delete_hive(&self, caller: &Caller, id: &HiveId) -> Result<(), HiveError> {
        self.load_owned(caller, id).await?;
        self.repository.delete_hive(id).await?;
        tracing::info!(hive_id = %id, owner_id = %caller.id, "Hive deleted");

        Ok(())
    }

    async fn record_inspection(
        &self,
        caller: &Caller,
        command: RecordInspectionCommand,
    ) -> Result<Inspection, HiveError> {
        let hive = self.load_referenced(caller, &command.hive_id).await?;

        let inspection = Inspection {
            id: InspectionId::new(),
            hive_id: hive.id,
            owner_id: caller.id,
            temperature: command.temperature,
            humidity: command.humidity,
            weight: command.weight,
            notes: command.notes,
            status: command.status,
            created_at: Utc::now(),
            updated_at: None,
        };

        let created = self.repository.create_inspection(inspection).await?;
        tracing::info!(
            inspection_id = %created.id,
            hive_id = %created.hive_id,
            status = ?created.status,
            "Inspection recorded"
        );

        Ok(created)
    }

    async fn list_inspections(
        &self,
        caller: &Caller,
        hive_id: &HiveId,
        page: Page,
    ) -> Result<Vec<Inspection>, HiveError> {
        self.load_referenced(caller, hive_id).await?;
        self.repository.list_inspections(hive_id, page).await
    }
}

#[cfg(test)]
mod tests {
    use auth::AccessError;
    use auth::UserId;
    use mockall::mock;

    use super::*;
    use crate::domain::hive::models::HiveName;
    use crate::domain::hive::models::HiveStats;
    use crate::domain::hive::models::HiveStatus;

    mock! {
        pub TestHiveRepository {}

        #[async_trait]
        impl HiveRepository for TestHiveRepository {
            async fn create_hive(&self, hive: Hive) -> Result<Hive, HiveError>;
            async fn find_hive(&self, id: &HiveId) -> Result<Option<Hive>, HiveError>;
            async fn list_hives_by_owner(&self, owner_id: &UserId, page: Page) -> Result<Vec<Hive>, HiveError>;
            async fn update_hive(&self, hive: Hive) -> Result<Hive, HiveError>;
            async fn delete_hive(&self, id: &HiveId) -> Result<(), HiveError>;
            async fn hive_stats(&self, id: &HiveId) -> Result<HiveStats, HiveError>;
            async fn create_inspection(&self, inspection: Inspection) -> Result<Inspection, HiveError>;
            async fn list_inspections(&self, hive_id: &HiveId, page: Page) -> Result<Vec<Inspection>, HiveError>;
        }
    }

    fn caller(username: &str) -> Caller {
        Caller {
            id: UserId::new(),
            username: username.to_string(),
            is_active: true,
            is_superuser: false,
        }
    }

    fn stored_hive(owner: &Caller) -> Hive {
        Hive {
            id: HiveId::new(),
            owner_id: owner.id,
            name: HiveName::new("H1".to_string()).unwrap(),
            location: None,
            description: None,
            status: HiveStatus::Healthy,
            queen_year: Some(2023),
            frames_count: Some(8),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn inspection_command(hive_id: HiveId) -> RecordInspectionCommand {
        RecordInspectionCommand {
            hive_id,
            temperature: Some(34.5),
            humidity: None,
            weight: None,
            notes: Some("Calm colony".to_string()),
            status: Some(HiveStatus::Warning),
        }
    }

    #[tokio::test]
    async fn test_create_hive_stamps_owner() {
        let alice = caller("alice");
        let alice_id = alice.id;
        let mut repository = MockTestHiveRepository::new();
        repository
            .expect_create_hive()
            .withf(move |hive| hive.owner_id == alice_id && hive.status == HiveStatus::Healthy)
            .times(1)
            .returning(|hive| Ok(hive));

        let command = CreateHiveCommand::new(
            HiveName::new("H1".to_string()).unwrap(),
            None,
            None,
            None,
            None,
            None,
        )
        .unwrap();

        let hive = HiveService::new(Arc::new(repository))
            .create_hive(&alice, command)
            .await
            .unwrap();

        assert_eq!(hive.owner_id, alice.id);
        assert_eq!(hive.name.as_str(), "H1");
    }

    #[tokio::test]
    async fn test_get_hive_of_other_owner_is_forbidden() {
        let alice = caller("alice");
        let bob = caller("bob");
        let hive = stored_hive(&alice);
        let hive_id = hive.id;
        let mut repository = MockTestHiveRepository::new();
        repository
            .expect_find_hive()
            .returning(move |_| Ok(Some(hive.clone())));
        repository.expect_hive_stats().times(0);

        let result = HiveService::new(Arc::new(repository))
            .get_hive(&bob, &hive_id)
            .await;

        assert_eq!(result, Err(HiveError::Access(AccessError::Forbidden)));
    }

    #[tokio::test]
    async fn test_get_missing_hive() {
        let mut repository = MockTestHiveRepository::new();
        repository.expect_find_hive().returning(|_| Ok(None));

        let result = HiveService::new(Arc::new(repository))
            .get_hive(&caller("alice"), &HiveId::new())
            .await;

        assert!(matches!(result, Err(HiveError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_hive_includes_stats() {
        let alice = caller("alice");
        let hive = stored_hive(&alice);
        let hive_id = hive.id;
        let mut repository = MockTestHiveRepository::new();
        repository
            .expect_find_hive()
            .returning(move |_| Ok(Some(hive.clone())));
        repository.expect_hive_stats().times(1).returning(|_| {
            Ok(HiveStats {
                avg_temperature: Some(35.0),
                latest_status: Some(HiveStatus::Critical),
                ..Default::default()
            })
        });

        let view = HiveService::new(Arc::new(repository))
            .get_hive(&alice, &hive_id)
            .await
            .unwrap();

        assert_eq!(view.status, HiveStatus::Critical);
        assert_eq!(view.avg_temperature, Some(35.0));
    }

    #[tokio::test]
    async fn test_update_hive_applies_patch() {
        let alice = caller("alice");
        let hive = stored_hive(&alice);
        let hive_id = hive.id;
        let mut repository = MockTestHiveRepository::new();
        repository
            .expect_find_hive()
            .returning(move |_| Ok(Some(hive.clone())));
        repository
            .expect_update_hive()
            .withf(|hive| hive.location.as_deref() == Some("Meadow") && hive.updated_at.is_some())
            .times(1)
            .returning(|hive| Ok(hive));

        let command = UpdateHiveCommand {
            location: Some("Meadow".to_string()),
            ..Default::default()
        };

        let updated = HiveService::new(Arc::new(repository))
            .update_hive(&alice, &hive_id, command)
            .await
            .unwrap();

        assert_eq!(updated.frames_count, Some(8));
    }

    #[tokio::test]
    async fn test_delete_hive_of_other_owner_is_forbidden() {
        let alice = caller("alice");
        let hive = stored_hive(&alice);
        let hive_id = hive.id;
        let mut repository = MockTestHiveRepository::new();
        repository
            .expect_find_hive()
            .returning(move |_| Ok(Some(hive.clone())));
        repository.expect_delete_hive().times(0);

        let result = HiveService::new(Arc::new(repository))
            .delete_hive(&caller("mallory"), &hive_id)
            .await;

        assert_eq!(result, Err(HiveError::Access(AccessError::Forbidden)));
    }

    #[tokio::test]
    async fn test_record_inspection_on_own_hive() {
        let alice = caller("alice");
        let alice_id = alice.id;
        let hive = stored_hive(&alice);
        let hive_id = hive.id;
        let mut repository = MockTestHiveRepository::new();
        repository
            .expect_find_hive()
            .returning(move |_| Ok(Some(hive.clone())));
        repository
            .expect_create_inspection()
            .withf(move |inspection| {
                inspection.owner_id == alice_id && inspection.hive_id == hive_id
            })
            .times(1)
            .returning(|inspection| Ok(inspection));

        let inspection = HiveService::new(Arc::new(repository))
            .record_inspection(&alice, inspection_command(hive_id))
            .await
            .unwrap();

        assert_eq!(inspection.status, Some(HiveStatus::Warning));
    }

    #[tokio::test]
    async fn test_record_inspection_on_foreign_hive_is_not_found() {
        let alice = caller("alice");
        let hive = stored_hive(&alice);
        let hive_id = hive.id;
        let mut repository = MockTestHiveRepository::new();
        repository
            .expect_find_hive()
            .returning(move |_| Ok(Some(hive.clone())));
        repository.expect_create_inspection().times(0);

        let result = HiveService::new(Arc::new(repository))
            .record_inspection(&caller("bob"), inspection_command(hive_id))
            .await;

        assert_eq!(result, Err(HiveError::NotFound(hive_id.to_string())));
    }

    #[tokio::test]
    async fn test_list_inspections_of_foreign_hive_is_not_found() {
        let alice = caller("alice");
        let hive = stored_hive(&alice);
        let hive_id = hive.id;
        let mut repository = MockTestHiveRepository::new();
        repository
            .expect_find_hive()
            .returning(move |_| Ok(Some(hive.clone())));
        repository.expect_list_inspections().times(0);

        let result = HiveService::new(Arc::new(repository))
            .list_inspections(&caller("bob"), &hive_id, Page::default())
            .await;

        assert!(matches!(result, Err(HiveError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_hives_scoped_to_caller() {
        let alice = caller("alice");
        let alice_id = alice.id;
        let mut repository = MockTestHiveRepository::new();
        repository
            .expect_list_hives_by_owner()
            .withf(move |owner_id, _| *owner_id == alice_id)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let hives = HiveService::new(Arc::new(repository))
            .list_hives(&alice, Page::default())
            .await
            .unwrap();

        assert!(hives.is_empty());
    }
}
