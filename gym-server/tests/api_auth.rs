//! Session and guard behaviour

mod common;

use common::{PASSWORD, TestApp, session_cookie};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_missing_cookie_is_unauthorized() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/api/members", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(Method::GET, "/api/members", Some("token=not.a.jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn test_register_login_me_logout() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;

    let (status, me) = app.get("/api/auth/me", &owner).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["email"], "owner@iron.test");
    assert_eq!(me["user"]["role"], "gym_owner");
    assert!(me["user"].get("passwordHash").is_none());
    assert_eq!(me["organization"]["name"], "Iron Temple");
    assert_eq!(me["organization"]["subscription"]["plan"], "trial");
    assert_eq!(me["organization"]["settings"]["currency"], "INR");

    let (status, set_cookie, body) = app
        .send_raw(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "OWNER@iron.test", "password": PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let set_cookie = set_cookie.unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = session_cookie(&set_cookie);
    let (status, _) = app
        .send(Method::GET, "/api/auth/me", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, set_cookie, _) = app
        .send_raw(Method::POST, "/api/auth/logout", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(set_cookie.unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_wrong_password_and_duplicate_signup() {
    let app = TestApp::new().await;
    app.register("Iron Temple", "owner@iron.test").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "owner@iron.test", "password": "wrong-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "gymName": "Copy Gym",
                "name": "Someone",
                "email": "owner@iron.test",
                "password": PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1008);
}

#[tokio::test]
async fn test_invalid_signup_is_bad_request() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "organizationName": "Gym",
                "name": "Owner",
                "email": "not-an-email",
                "password": "short",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    let fields = body["details"]["fields"].as_array().unwrap();
    assert!(fields.contains(&json!("email")));
    assert!(fields.contains(&json!("password")));
}

#[tokio::test]
async fn test_failed_registration_leaves_no_login_behind() {
    let app = TestApp::new().await;
    app.reject_writes("organization", "name", "Broken Gym").await;

    let signup = |gym: &str| {
        json!({
            "organizationName": gym,
            "name": "Owner",
            "email": "owner@retry.test",
            "password": PASSWORD,
        })
    };
    let (status, body) = app
        .send(Method::POST, "/api/auth/register", None, Some(signup("Broken Gym")))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{body}");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "owner@retry.test", "password": PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The email is free again
    let (status, body) = app
        .send(Method::POST, "/api/auth/register", None, Some(signup("Fixed Gym")))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}
