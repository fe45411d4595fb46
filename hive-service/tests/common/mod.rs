use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::AccessError;
use auth::AccessGuard;
use auth::Authenticator;
use auth::Caller;
use auth::CallerDirectory;
use auth::Page;
use auth::TokenSettings;
use auth::UserId;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use hive_service::domain::hive::errors::HiveError;
use hive_service::domain::hive::models::Hive;
use hive_service::domain::hive::models::HiveId;
use hive_service::domain::hive::models::HiveStats;
use hive_service::domain::hive::models::Inspection;
use hive_service::domain::hive::ports::HiveRepository;
use hive_service::domain::hive::service::HiveService;
use hive_service::inbound::http::router::create_router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Identities known to the access guard, keyed by username.
#[derive(Default)]
pub struct InMemoryDirectory {
    callers: Mutex<HashMap<String, Caller>>,
}

impl InMemoryDirectory {
    pub fn insert(&self, caller: Caller) {
        self.callers
            .lock()
            .unwrap()
            .insert(caller.username.clone(), caller);
    }
}

#[async_trait]
impl CallerDirectory for InMemoryDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<Caller>, AccessError> {
        Ok(self.callers.lock().unwrap().get(username).cloned())
    }
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[derive(Default)]
pub struct InMemoryHiveRepository {
    hives: Mutex<Vec<Hive>>,
    inspections: Mutex<Vec<Inspection>>,
}

#[async_trait]
impl HiveRepository for InMemoryHiveRepository {
    async fn create_hive(&self, hive: Hive) -> Result<Hive, HiveError> {
        self.hives.lock().unwrap().push(hive.clone());
        Ok(hive)
    }

    async fn find_hive(&self, id: &HiveId) -> Result<Option<Hive>, HiveError> {
        Ok(self.hives.lock().unwrap().iter().find(|h| h.id == *id).cloned())
    }

    async fn list_hives_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Hive>, HiveError> {
        Ok(self
            .hives
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.owner_id == *owner_id)
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn update_hive(&self, hive: Hive) -> Result<Hive, HiveError> {
        let mut hives = self.hives.lock().unwrap();
        let slot = hives
            .iter_mut()
            .find(|h| h.id == hive.id)
            .ok_or_else(|| HiveError::NotFound(hive.id.to_string()))?;
        *slot = hive.clone();
        Ok(hive)
    }

    async fn delete_hive(&self, id: &HiveId) -> Result<(), HiveError> {
        let mut hives = self.hives.lock().unwrap();
        let before = hives.len();
        hives.retain(|h| h.id != *id);
        if hives.len() == before {
            return Err(HiveError::NotFound(id.to_string()));
        }
        self.inspections.lock().unwrap().retain(|i| i.hive_id != *id);
        Ok(())
    }

    async fn hive_stats(&self, id: &HiveId) -> Result<HiveStats, HiveError> {
        let inspections = self.inspections.lock().unwrap();
        let own: Vec<&Inspection> = inspections.iter().filter(|i| i.hive_id == *id).collect();

        Ok(HiveStats {
            avg_temperature: average(own.iter().filter_map(|i| i.temperature)),
            avg_humidity: average(own.iter().filter_map(|i| i.humidity)),
            avg_weight: average(own.iter().filter_map(|i| i.weight)),
            last_inspection_date: own.iter().map(|i| i.created_at).max(),
            latest_status: own
                .iter()
                .filter(|i| i.status.is_some())
                .max_by_key(|i| i.created_at)
                .and_then(|i| i.status),
        })
    }

    async fn create_inspection(&self, inspection: Inspection) -> Result<Inspection, HiveError> {
        if let Some(status) = inspection.status {
            if let Some(hive) = self
                .hives
                .lock()
                .unwrap()
                .iter_mut()
                .find(|h| h.id == inspection.hive_id)
            {
                hive.status = status;
            }
        }
        self.inspections.lock().unwrap().push(inspection.clone());
        Ok(inspection)
    }

    async fn list_inspections(
        &self,
        hive_id: &HiveId,
        page: Page,
    ) -> Result<Vec<Inspection>, HiveError> {
        let mut inspections: Vec<Inspection> = self
            .inspections
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.hive_id == *hive_id)
            .cloned()
            .collect();
        inspections.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(inspections
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .collect())
    }
}

/// Router wired to in-memory storage, driven in-process with `oneshot`.
pub struct TestApp {
    pub router: Router,
    pub authenticator: Arc<Authenticator>,
    pub directory: Arc<InMemoryDirectory>,
}

impl TestApp {
    pub fn new() -> Self {
        let authenticator = Arc::new(
            Authenticator::new(&TokenSettings::new(TEST_SECRET)).expect("valid token settings"),
        );
        let directory = Arc::new(InMemoryDirectory::default());
        let guard = AccessGuard::new(Arc::clone(&authenticator), directory.clone());
        let hive_service = Arc::new(HiveService::new(Arc::new(
            InMemoryHiveRepository::default(),
        )));

        let router = create_router(
            hive_service,
            guard,
            &["http://localhost:3000".to_string()],
        );

        Self {
            router,
            authenticator,
            directory,
        }
    }

    /// Register an active identity with the guard and mint a token for it.
    pub fn sign_in(&self, username: &str) -> (UserId, String) {
        let id = UserId::new();
        self.directory.insert(Caller {
            id,
            username: username.to_string(),
            is_active: true,
            is_superuser: false,
        });
        let token = self
            .authenticator
            .issue_token(username)
            .expect("token issued")
            .access_token;

        (id, token)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    /// Create a hive as the token's owner and return its id.
    pub async fn create_hive(&self, token: &str, name: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/hives/",
                Some(token),
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create hive failed: {}", body);

        body["data"]["id"].as_str().unwrap().to_string()
    }
}
