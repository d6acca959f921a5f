//! Test harness: the real router over an in-memory database

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tower::ServiceExt;

use gym_server::api::build_router;
use gym_server::core::{Config, ServerState};
use gym_server::db::DbService;
use gym_server::services::{BiometricDevice, MockBiometricDevice};

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const PASSWORD: &str = "s3cret-pass";

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
}

/// Gym owner session
pub struct Owner {
    pub cookie: String,
    pub user_id: String,
    pub organization_id: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_device(Arc::new(MockBiometricDevice::with_fixed_quality(90))).await
    }

    pub async fn with_device(device: Arc<dyn BiometricDevice>) -> Self {
        let config = Config::in_memory(JWT_SECRET);
        let db = DbService::open(&config).await.unwrap();
        let state = ServerState::new(config, db).with_biometric_device(device);
        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    pub fn db(&self) -> Surreal<Db> {
        self.state.get_db()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, json) = self.send_raw(method, uri, cookie, body).await;
        (status, json)
    }

    /// Like [`send`](Self::send) but also returns the `Set-Cookie` header
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Option<String>, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, set_cookie, json)
    }

    pub async fn get(&self, uri: &str, owner: &Owner) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(&owner.cookie), None).await
    }

    pub async fn post(&self, uri: &str, owner: &Owner, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&owner.cookie), Some(body))
            .await
    }

    pub async fn put(&self, uri: &str, owner: &Owner, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(&owner.cookie), Some(body))
            .await
    }

    /// Sign up a new gym and return its owner's session
    pub async fn register(&self, gym: &str, email: &str) -> Owner {
        let (status, set_cookie, body) = self
            .send_raw(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "organizationName": gym,
                    "name": "Owner",
                    "email": email,
                    "password": PASSWORD,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        Owner {
            cookie: session_cookie(&set_cookie.unwrap()),
            user_id: body["user"]["id"].as_str().unwrap().to_string(),
            organization_id: body["organization"]["id"].as_str().unwrap().to_string(),
        }
    }

    /// Make every write of `table` with `field = value` fail in the store
    pub async fn reject_writes(&self, table: &str, field: &str, value: &str) {
        self.db()
            .query(format!(
                "DEFINE FIELD {field} ON TABLE {table} ASSERT $value != '{value}'"
            ))
            .await
            .unwrap()
            .check()
            .unwrap();
    }

    /// Create a member through the API; returns the member JSON
    pub async fn create_member(&self, owner: &Owner, body: Value) -> Value {
        let (status, json) = self.post("/api/members", owner, body).await;
        assert_eq!(status, StatusCode::CREATED, "create member failed: {json}");
        json["member"].clone()
    }
}

/// `name=value` part of a `Set-Cookie` header
pub fn session_cookie(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

pub fn today() -> chrono::NaiveDate {
    shared::util::today()
}
