mod common;

use axum::http::Method;
use axum::http::StatusCode;
use chrono::Duration;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "service": "identity" }));
}

#[tokio::test]
async fn test_register_user_success() {
    let app = TestApp::new();

    let (status, body) = app.register("alice", "alice@x.com", "pw123456").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@x.com");
    assert_eq!(body["data"]["is_active"], true);
    assert_eq!(body["data"]["is_superuser"], false);
    assert!(body["data"]["id"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new();
    app.register("alice", "alice@x.com", "pw123456").await;

    let (status, body) = app.register("alice", "other@x.com", "pw123456").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["data"]["kind"], "duplicate_identity");
    assert_eq!(body["data"]["message"], "Username already registered");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register("alice", "alice@x.com", "pw123456").await;

    let (status, body) = app.register("alice2", "alice@x.com", "pw123456").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["data"]["message"], "Email already registered");
}

#[tokio::test]
async fn test_register_rejects_display_form_of_taken_email() {
    let app = TestApp::new();
    app.register("alice", "alice@x.com", "pw123456").await;

    let (status, body) = app
        .register("mallory", "Mallory <alice@x.com>", "pw123456")
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["kind"], "validation");
}

#[tokio::test]
async fn test_register_rejects_overlong_email() {
    let app = TestApp::new();
    let label = "b".repeat(63);
    let email = format!("{}@{label}.{label}.{label}.com", "a".repeat(64));

    let (status, body) = app.register("alice", &email, "pw123456").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["kind"], "validation");
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = TestApp::new();

    let (short_password, body) = app.register("alice", "alice@x.com", "short").await;
    assert_eq!(short_password, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["kind"], "validation");

    let (bad_email, _) = app.register("alice", "not-an-email", "pw123456").await;
    assert_eq!(bad_email, StatusCode::UNPROCESSABLE_ENTITY);

    let (bad_username, _) = app.register("a b", "alice@x.com", "pw123456").await;
    assert_eq!(bad_username, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_token_roundtrip() {
    let app = TestApp::new();
    app.register("alice", "alice@x.com", "pw123456").await;

    let (status, body) = app.login("alice", "pw123456").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_type"], "bearer");
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert!(body["data"]["expires_at"].is_string());

    let token = body["data"]["access_token"].as_str().unwrap();
    assert_eq!(app.authenticator.verify_token(token).unwrap(), "alice");
}

#[tokio::test]
async fn test_token_rejects_bad_credentials() {
    let app = TestApp::new();
    app.register("alice", "alice@x.com", "pw123456").await;

    let (wrong_password, body) = app.login("alice", "wrong-password").await;
    let (unknown_user, other) = app.login("nobody", "pw123456").await;

    assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user, StatusCode::UNAUTHORIZED);
    assert_eq!(body["data"]["kind"], "invalid_credentials");
    assert_eq!(body, other);
}

#[tokio::test]
async fn test_users_me() {
    let app = TestApp::new();
    let (id, token) = app.signed_up("alice", "pw123456").await;

    let (status, body) = app.request(Method::GET, "/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/users/me", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["data"]["kind"], "unauthenticated");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new();
    app.signed_up("alice", "pw123456").await;
    let expired = app
        .authenticator
        .issue_token_with_ttl("alice", Duration::seconds(-5))
        .unwrap()
        .access_token;

    let (status, _) = app.request(Method::GET, "/users/me", Some(&expired), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivated_account_is_rejected_with_live_token() {
    let app = TestApp::new();
    let (_, token) = app.signed_up("alice", "pw123456").await;
    app.users.set_flags("alice", false, false);

    let (status, body) = app.request(Method::GET, "/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["kind"], "inactive_account");
}

#[tokio::test]
async fn test_get_other_user_is_forbidden() {
    let app = TestApp::new();
    let (alice_id, _) = app.signed_up("alice", "pw123456").await;
    let (_, bob_token) = app.signed_up("bob", "pw123456").await;

    let (status, body) = app
        .request(Method::GET, &format!("/users/{}", alice_id), Some(&bob_token), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["data"]["kind"], "forbidden");
    assert!(body["data"].get("username").is_none());
}

#[tokio::test]
async fn test_list_users_requires_privilege() {
    let app = TestApp::new();
    let (_, alice_token) = app.signed_up("alice", "pw123456").await;
    let (_, admin_token) = app.signed_up("admin", "pw123456").await;
    app.users.set_flags("admin", true, true);

    let (forbidden, _) = app.request(Method::GET, "/users/", Some(&alice_token), None).await;
    let (status, body) = app
        .request(Method::GET, "/users/?skip=0&limit=1", Some(&admin_token), None)
        .await;

    assert_eq!(forbidden, StatusCode::FORBIDDEN);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_self_and_privileged_flags() {
    let app = TestApp::new();
    let (alice_id, alice_token) = app.signed_up("alice", "pw123456").await;
    let uri = format!("/users/{}", alice_id);

    let (status, body) = app
        .request(
            Method::PUT,
            &uri,
            Some(&alice_token),
            Some(json!({ "email": "alice@apiary.org" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "alice@apiary.org");
    assert!(body["data"]["updated_at"].is_string());

    let (status, _) = app
        .request(
            Method::PUT,
            &uri,
            Some(&alice_token),
            Some(json!({ "is_superuser": true })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_unknown_user_as_admin() {
    let app = TestApp::new();
    let (_, admin_token) = app.signed_up("admin", "pw123456").await;
    app.users.set_flags("admin", true, true);

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/users/{}", uuid::Uuid::new_v4()),
            Some(&admin_token),
            Some(json!({ "is_active": false })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["kind"], "not_found");
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    let (_, token) = app.signed_up("alice", "pw123456").await;

    let (wrong, _) = app
        .request(
            Method::POST,
            "/change-password",
            Some(&token),
            Some(json!({ "current_password": "nope-nope", "new_password": "newpassword123" })),
        )
        .await;
    assert_eq!(wrong, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request(
            Method::POST,
            "/change-password",
            Some(&token),
            Some(json!({ "current_password": "pw123456", "new_password": "newpassword123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Password changed successfully");

    let (old_login, _) = app.login("alice", "pw123456").await;
    let (new_login, _) = app.login("alice", "newpassword123").await;
    assert_eq!(old_login, StatusCode::UNAUTHORIZED);
    assert_eq!(new_login, StatusCode::OK);
}
