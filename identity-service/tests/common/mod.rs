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
use identity_service::domain::user::errors::UserError;
use identity_service::domain::user::models::User;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Users table stand-in; also answers caller lookups for the access guard.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn set_flags(&self, username: &str, is_active: bool, is_superuser: bool) {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.username.as_str() == username)
            .expect("user exists");
        user.is_active = is_active;
        user.is_superuser = is_superuser;
    }

    fn check_unique(users: &[User], candidate: &User) -> Result<(), UserError> {
        for user in users.iter().filter(|u| u.id != candidate.id) {
            if user.username == candidate.username {
                return Err(UserError::DuplicateIdentity("Username".to_string()));
            }
            if user.email == candidate.email {
                return Err(UserError::DuplicateIdentity("Email".to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        Self::check_unique(&users, &user)?;
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        Self::check_unique(&users, &user)?;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;
        *slot = user.clone();
        Ok(user)
    }
}

#[async_trait]
impl CallerDirectory for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Caller>, AccessError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.as_str() == username)
            .map(User::as_caller))
    }
}

/// Router wired to in-memory storage, driven in-process with `oneshot`.
pub struct TestApp {
    pub router: Router,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let authenticator = Arc::new(
            Authenticator::new(&TokenSettings::new(TEST_SECRET)).expect("valid token settings"),
        );
        let users = Arc::new(InMemoryUserRepository::default());
        let guard = AccessGuard::new(Arc::clone(&authenticator), users.clone());
        let user_service = Arc::new(UserService::new(users.clone(), Arc::clone(&authenticator)));

        let router = create_router(
            user_service,
            guard,
            &["http://localhost:3000".to_string()],
        );

        Self {
            router,
            authenticator,
            users,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
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

        self.send(request).await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/users/",
            None,
            Some(serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={}&password={}", username, password)))
            .unwrap();

        self.send(request).await
    }

    /// Register and log in, returning the user's id and access token.
    pub async fn signed_up(&self, username: &str, password: &str) -> (String, String) {
        let (status, body) = self
            .register(username, &format!("{}@x.com", username), password)
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        let (status, body) = self.login(username, password).await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        (
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
            body["data"]["access_token"].as_str().unwrap().to_string(),
        )
    }
}
