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
use http_body_util::BodyExt;
use notification_service::inbound::http::router::create_router;
use notification_service::notification::errors::NotificationError;
use notification_service::notification::models::Notification;
use notification_service::notification::models::NotificationId;
use notification_service::notification::ports::NotificationRepository;
use notification_service::notification::service::NotificationService;
use notification_service::settings::errors::SettingsError;
use notification_service::settings::models::NotificationSettings;
use notification_service::settings::ports::SettingsRepository;
use notification_service::settings::service::SettingsService;
use notification_service::template::errors::TemplateError;
use notification_service::template::models::Template;
use notification_service::template::models::TemplateId;
use notification_service::template::models::TemplateName;
use notification_service::template::ports::TemplateRepository;
use notification_service::template::service::TemplateService;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

#[derive(Default)]
pub struct InMemoryDirectory {
    callers: Mutex<HashMap<String, Caller>>,
}

#[async_trait]
impl CallerDirectory for InMemoryDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<Caller>, AccessError> {
        Ok(self.callers.lock().unwrap().get(username).cloned())
    }
}

fn paged<T>(items: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    items
        .skip(page.skip() as usize)
        .take(page.limit() as usize)
        .collect()
}

/// Templates in insertion order.
#[derive(Default)]
pub struct InMemoryTemplateRepository {
    templates: Mutex<Vec<Template>>,
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn create_template(&self, template: Template) -> Result<Template, TemplateError> {
        let mut templates = self.templates.lock().unwrap();
        if templates.iter().any(|t| t.name == template.name) {
            return Err(TemplateError::DuplicateName(template.name.as_str().to_string()));
        }
        templates.push(template.clone());
        Ok(template)
    }

    async fn find_template(&self, id: &TemplateId) -> Result<Option<Template>, TemplateError> {
        Ok(self
            .templates
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == *id)
            .cloned())
    }

    async fn find_template_by_name(
        &self,
        name: &TemplateName,
    ) -> Result<Option<Template>, TemplateError> {
        Ok(self
            .templates
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name == *name)
            .cloned())
    }

    async fn list_templates(&self, page: Page) -> Result<Vec<Template>, TemplateError> {
        Ok(paged(self.templates.lock().unwrap().iter().cloned(), page))
    }
}

#[derive(Default)]
pub struct InMemorySettingsRepository {
    settings: Mutex<HashMap<UserId, NotificationSettings>>,
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn find_settings(
        &self,
        owner_id: &UserId,
    ) -> Result<Option<NotificationSettings>, SettingsError> {
        Ok(self.settings.lock().unwrap().get(owner_id).cloned())
    }

    async fn create_settings(
        &self,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings, SettingsError> {
        let mut stored = self.settings.lock().unwrap();
        if stored.contains_key(&settings.owner_id) {
            return Err(SettingsError::AlreadyExists(settings.owner_id.to_string()));
        }
        stored.insert(settings.owner_id, settings.clone());
        Ok(settings)
    }

    async fn update_settings(
        &self,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings, SettingsError> {
        let mut stored = self.settings.lock().unwrap();
        match stored.get_mut(&settings.owner_id) {
            Some(existing) => {
                *existing = settings.clone();
                Ok(settings)
            }
            None => Err(SettingsError::NotFound(settings.owner_id.to_string())),
        }
    }
}

/// Notifications in insertion order, which is also creation order.
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, NotificationError> {
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    async fn find_notification(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, NotificationError> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == *id)
            .cloned())
    }

    async fn list_notifications_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Notification>, NotificationError> {
        let notifications = self.notifications.lock().unwrap();
        Ok(paged(
            notifications
                .iter()
                .rev()
                .filter(|n| n.owner_id == *owner_id)
                .cloned(),
            page,
        ))
    }

    async fn list_pending(&self, page: Page) -> Result<Vec<Notification>, NotificationError> {
        let notifications = self.notifications.lock().unwrap();
        Ok(paged(
            notifications.iter().filter(|n| !n.is_sent).cloned(),
            page,
        ))
    }

    async fn update_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, NotificationError> {
        let mut notifications = self.notifications.lock().unwrap();
        let stored = notifications
            .iter_mut()
            .find(|n| n.id == notification.id)
            .ok_or_else(|| NotificationError::NotFound(notification.id.to_string()))?;
        *stored = notification.clone();
        Ok(notification)
    }
}

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
        let templates = Arc::new(InMemoryTemplateRepository::default());
        let guard = AccessGuard::new(Arc::clone(&authenticator), directory.clone());

        let router = create_router(
            Arc::new(TemplateService::new(Arc::clone(&templates))),
            Arc::new(SettingsService::new(Arc::new(
                InMemorySettingsRepository::default(),
            ))),
            Arc::new(NotificationService::new(
                Arc::new(InMemoryNotificationRepository::default()),
                templates,
            )),
            guard,
            &["http://localhost:3000".to_string()],
        );

        Self {
            router,
            authenticator,
            directory,
        }
    }

    fn register(&self, username: &str, is_superuser: bool) -> (UserId, String) {
        let id = UserId::new();
        self.directory.callers.lock().unwrap().insert(
            username.to_string(),
            Caller {
                id,
                username: username.to_string(),
                is_active: true,
                is_superuser,
            },
        );
        let token = self
            .authenticator
            .issue_token(username)
            .expect("token issued")
            .access_token;

        (id, token)
    }

    pub fn sign_in(&self, username: &str) -> (UserId, String) {
        self.register(username, false)
    }

    pub fn sign_in_admin(&self, username: &str) -> (UserId, String) {
        self.register(username, true)
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

    /// Create a template as `admin_token` and return its id.
    pub async fn create_template(&self, admin_token: &str, name: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/templates/",
                Some(admin_token),
                Some(serde_json::json!({
                    "name": name,
                    "subject": "Hive alert",
                    "body": "One of your hives needs attention",
                    "notification_type": "email",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create template failed: {}", body);

        body["data"]["id"].as_str().unwrap().to_string()
    }
}
