//! Payments and subscription renewal

mod common;

use std::sync::Arc;

use chrono::{Months, NaiveDate};
use common::TestApp;
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_membership_payment_extends_by_one_month() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let member = app
        .create_member(
            &owner,
            json!({
                "name": "Renewing Rita",
                "phone": "9000000010",
                "planDuration": 30,
                "amount": 1500,
                "startDate": "2024-12-11"
            }),
        )
        .await;
    assert_eq!(member["subscription"]["endDate"], "2025-01-10");
    let member_id = member["id"].as_str().unwrap();

    let (status, body) = app
        .post(
            "/api/payments",
            &owner,
            json!({
                "memberId": member_id,
                "amount": 1500,
                "paymentMethod": "upi",
                "paymentType": "membership"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Payment recorded successfully");
    assert_eq!(body["payment"]["memberName"], "Renewing Rita");
    assert_eq!(body["payment"]["status"], "completed");
    assert_eq!(body["payment"]["createdBy"], owner.user_id.as_str());
    assert_eq!(body["member"]["subscription"]["endDate"], "2025-02-10");

    let (_, stored) = app.get(&format!("/api/members/{member_id}"), &owner).await;
    assert_eq!(stored["member"]["subscription"]["endDate"], "2025-02-10");
    assert_eq!(stored["member"]["subscription"]["status"], "active");
}

#[tokio::test]
async fn test_renewal_reactivates_suspended_member() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let member = app
        .create_member(
            &owner,
            json!({"name": "Paused", "phone": "9000000011", "planDuration": 30, "startDate": "2025-01-31"}),
        )
        .await;
    let member_id = member["id"].as_str().unwrap();
    assert_eq!(member["subscription"]["endDate"], "2025-03-02");
    let (status, _) = app
        .put(
            &format!("/api/members/{member_id}"),
            &owner,
            json!({"subscription": {"status": "suspended"}}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/payments",
            &owner,
            json!({"memberId": member_id, "amount": 999.5, "type": "renewal", "method": "cash"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["member"]["subscription"]["endDate"], "2025-04-02");
    assert_eq!(body["member"]["subscription"]["status"], "active");
}

#[tokio::test]
async fn test_other_payment_leaves_subscription() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let member = app
        .create_member(
            &owner,
            json!({"name": "Towel Buyer", "phone": "9000000012", "planDuration": 30, "startDate": "2024-12-11"}),
        )
        .await;
    let member_id = member["id"].as_str().unwrap();

    let (status, body) = app
        .post(
            "/api/payments",
            &owner,
            json!({"memberId": member_id, "amount": 200, "type": "other", "method": "card"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert!(body.get("member").is_none());

    let (_, stored) = app.get(&format!("/api/members/{member_id}"), &owner).await;
    assert_eq!(stored["member"]["subscription"]["endDate"], "2025-01-10");
}

#[tokio::test]
async fn test_non_positive_amount_is_rejected() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let member = app
        .create_member(&owner, json!({"name": "Zero", "phone": "9000000013", "planDuration": 30}))
        .await;
    let member_id = member["id"].as_str().unwrap();

    for amount in [json!(0), json!(-50)] {
        let (status, body) = app
            .post(
                "/api/payments",
                &owner,
                json!({"memberId": member_id, "amount": amount, "method": "cash"}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 5001);
    }

    let (_, overview) = app.get("/api/payments", &owner).await;
    assert!(overview["payments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unparseable_body_uses_error_envelope() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let member = app
        .create_member(&owner, json!({"name": "Typo", "phone": "9000000014", "planDuration": 30}))
        .await;
    let member_id = member["id"].as_str().unwrap();

    for body in [
        json!({"memberId": member_id, "amount": 100, "paymentType": "bogus"}),
        json!({"memberId": member_id, "amount": "lots"}),
        json!({"amount": 100}),
    ] {
        let (status, reply) = app.post("/api/payments", &owner, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{reply}");
        assert_eq!(reply["success"], false);
        assert_eq!(reply["code"], 2);
        assert!(reply["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    let (status, reply) = app
        .post("/api/members", &owner, json!({"name": 42, "phone": "9000000015"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply["code"], 2);
}

#[tokio::test]
async fn test_unknown_member_is_not_found() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let (status, body) = app
        .post(
            "/api/payments",
            &owner,
            json!({"memberId": "missing", "amount": 100, "method": "cash"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_overview_sums_revenue() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let member = app
        .create_member(&owner, json!({"name": "Payer", "phone": "9000000014", "planDuration": 30}))
        .await;
    let member_id = member["id"].as_str().unwrap();

    for amount in [json!(100.25), json!(200.5), json!(0.25)] {
        let (status, _) = app
            .post(
                "/api/payments",
                &owner,
                json!({"memberId": member_id, "amount": amount, "method": "cash", "type": "other"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/payments", &owner).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payments"].as_array().unwrap().len(), 3);
    assert_eq!(body["stats"]["totalPayments"], 3);
    assert_eq!(body["stats"]["totalRevenue"], 301.0);
    assert_eq!(body["stats"]["monthlyRevenue"], 301.0);
    assert_eq!(body["stats"]["todayRevenue"], 301.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_renewals_credit_one_month_each() {
    let app = Arc::new(TestApp::new().await);
    let owner = app.register("Iron Temple", "owner@iron.test").await;
    let member = app
        .create_member(
            &owner,
            json!({"name": "Racing Rick", "phone": "9000000019", "planDuration": 30, "startDate": "2024-12-11"}),
        )
        .await;
    let member_id = member["id"].as_str().unwrap().to_string();
    assert_eq!(member["subscription"]["endDate"], "2025-01-10");

    let mut handles = Vec::new();
    for _ in 0..6 {
        let app = Arc::clone(&app);
        let cookie = owner.cookie.clone();
        let body = json!({"memberId": member_id, "amount": 1500, "paymentType": "renewal"});
        handles.push(tokio::spawn(async move {
            app.send(Method::POST, "/api/payments", Some(&cookie), Some(body))
                .await
        }));
    }

    let mut renewed = 0u32;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::CREATED => renewed += 1,
            StatusCode::CONFLICT => assert_eq!(body["code"], 6, "{body}"),
            other => panic!("unexpected {other}: {body}"),
        }
    }
    assert!(renewed >= 1);

    // Every committed payment credited exactly one month
    let expected = NaiveDate::from_ymd_opt(2025, 1, 10)
        .unwrap()
        .checked_add_months(Months::new(renewed))
        .unwrap();
    let (_, stored) = app.get(&format!("/api/members/{member_id}"), &owner).await;
    assert_eq!(stored["member"]["subscription"]["endDate"], expected.to_string());

    let (_, list) = app.get("/api/payments", &owner).await;
    let paid = list["payments"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["memberId"] == member_id.as_str())
        .count();
    assert_eq!(paid, renewed as usize);
}
