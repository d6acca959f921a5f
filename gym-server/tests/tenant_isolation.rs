//! Every lookup is scoped to the caller's organization

mod common;

use common::{Owner, PASSWORD, TestApp, session_cookie};
use http::{Method, StatusCode};
use serde_json::json;

async fn two_gyms(app: &TestApp) -> (Owner, Owner, String) {
    let first = app.register("Iron Temple", "owner@iron.test").await;
    let second = app.register("Steel Studio", "owner@steel.test").await;
    let member = app
        .create_member(
            &first,
            json!({"name": "Private Pat", "phone": "9000000030", "planDuration": 30}),
        )
        .await;
    (first, second, member["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn test_foreign_member_is_invisible() {
    let app = TestApp::new().await;
    let (first, second, member_id) = two_gyms(&app).await;
    let uri = format!("/api/members/{member_id}");

    let (status, body) = app.get(&uri, &second).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, _) = app.put(&uri, &second, json!({"name": "Hijacked"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::DELETE, &uri, Some(&second.cookie), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app.get("/api/members", &second).await;
    assert!(list["members"].as_array().unwrap().is_empty());
    assert_eq!(list["pagination"]["total"], 0);

    // Untouched for its own gym
    let (status, body) = app.get(&uri, &first).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["member"]["name"], "Private Pat");
}

#[tokio::test]
async fn test_foreign_member_cannot_pay_or_check_in() {
    let app = TestApp::new().await;
    let (first, second, member_id) = two_gyms(&app).await;

    let (status, body) = app
        .post(
            "/api/payments",
            &second,
            json!({"memberId": member_id, "amount": 500, "method": "cash"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, _) = app
        .post("/api/attendance", &second, json!({"memberId": member_id}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owning gym's check-in is then visible to it alone
    let (status, body) = app
        .post("/api/attendance", &first, json!({"memberId": member_id}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let attendance_id = body["attendance"]["id"].as_str().unwrap().to_string();

    let (_, list) = app.get("/api/attendance", &second).await;
    assert!(list["attendance"].as_array().unwrap().is_empty());
    let (status, _) = app
        .put(&format!("/api/attendance/{attendance_id}/checkout"), &second, json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, payments) = app.get("/api/payments", &second).await;
    assert!(payments["payments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_catalog_is_per_organization() {
    let app = TestApp::new().await;
    let (first, second, _) = two_gyms(&app).await;

    let (_, plan) = app
        .post(
            "/api/plans",
            &first,
            json!({"name": "Monthly", "duration": 1, "durationType": "months", "amount": 1200}),
        )
        .await;
    let plan_id = plan["plan"]["id"].as_str().unwrap();

    let (status, _) = app.get(&format!("/api/plans/{plan_id}"), &second).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, plans) = app.get("/api/plans", &second).await;
    assert!(plans["plans"].as_array().unwrap().is_empty());

    // A foreign plan id cannot seed a member either
    let (status, body) = app
        .post(
            "/api/members",
            &second,
            json!({"name": "Sneaky", "phone": "9000000031", "planId": plan_id}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);

    let (_, lead) = app
        .post("/api/leads", &first, json!({"name": "Walk-in", "phone": "9000000032"}))
        .await;
    let lead_id = lead["lead"]["id"].as_str().unwrap();
    let (status, _) = app.get(&format!("/api/leads/{lead_id}"), &second).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_member_login_cannot_use_owner_actions() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let (_, created) = app
        .post(
            "/api/members",
            &owner,
            json!({"name": "Member Mo", "email": "mo@iron.test", "phone": "9000000033", "planDuration": 30}),
        )
        .await;
    let password = created["temporaryPassword"].as_str().unwrap().to_string();
    let member_id = created["member"]["id"].as_str().unwrap().to_string();
    assert_ne!(password, PASSWORD);

    let (status, set_cookie, body) = app
        .send_raw(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "mo@iron.test", "password": password})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["role"], "member");
    let cookie = session_cookie(&set_cookie.unwrap());

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/members/{member_id}"),
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/organization",
            Some(&cookie),
            Some(json!({"name": "Mine now"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/plans",
            Some(&cookie),
            Some(json!({"name": "Free", "duration": 1, "durationType": "years", "amount": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_member_login_cannot_reach_staff_routes() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let (_, created) = app
        .post(
            "/api/members",
            &owner,
            json!({
                "name": "Sneaky Sam",
                "email": "sam@iron.test",
                "phone": "9000000034",
                "planDuration": 30,
                "startDate": "2025-01-01"
            }),
        )
        .await;
    let password = created["temporaryPassword"].as_str().unwrap().to_string();
    let member_id = created["member"]["id"].as_str().unwrap().to_string();

    let (status, set_cookie, _) = app
        .send_raw(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "sam@iron.test", "password": password})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let cookie = session_cookie(&set_cookie.unwrap());

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/members/{member_id}"),
            Some(&cookie),
            Some(json!({"subscription": {"endDate": "2099-12-31", "status": "active"}})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/payments",
            Some(&cookie),
            Some(json!({"memberId": member_id, "amount": 10, "paymentType": "renewal"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    for uri in [
        "/api/members",
        "/api/payments",
        "/api/attendance",
        "/api/biometric/enroll",
        "/api/leads",
        "/api/dashboard/stats",
    ] {
        let (status, _) = app.send(Method::GET, uri, Some(&cookie), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
    }

    // Still their own session and gym profile
    let (status, _) = app.send(Method::GET, "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    // The subscription is untouched
    let (_, stored) = app.get(&format!("/api/members/{member_id}"), &owner).await;
    assert_eq!(stored["member"]["subscription"]["endDate"], "2025-01-31");
}
