//! Plans, leads and trainers

mod common;

use common::TestApp;
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_plan_lifecycle() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;

    for (name, amount) in [("Annual", 12000), ("Monthly", 1200)] {
        let (status, body) = app
            .post(
                "/api/plans",
                &owner,
                json!({"name": name, "duration": 1, "durationType": "months", "amount": amount, "features": ["Cardio"]}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["plan"]["isActive"], true);
    }

    let (_, body) = app.get("/api/plans", &owner).await;
    let names: Vec<&str> = body["plans"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Monthly", "Annual"]);

    let annual_id = body["plans"][1]["id"].as_str().unwrap().to_string();
    let (status, body) = app
        .put(&format!("/api/plans/{annual_id}"), &owner, json!({"isActive": false}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["plan"]["isActive"], false);
    assert_eq!(body["plan"]["name"], "Annual");

    let (_, active) = app.get("/api/plans?activeOnly=true", &owner).await;
    assert_eq!(active["plans"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .post(
            "/api/plans",
            &owner,
            json!({"name": "Broken", "duration": 1, "durationType": "days", "amount": -5}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let uri = format!("/api/plans/{annual_id}");
    let (status, _) = app.send(Method::DELETE, &uri, Some(&owner.cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.get(&uri, &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7001);
}

#[tokio::test]
async fn test_lead_pipeline() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;

    let (status, body) = app
        .post(
            "/api/leads",
            &owner,
            json!({"name": "Curious Carl", "phone": "9000000060", "source": "instagram"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["lead"]["status"], "new");
    let lead_id = body["lead"]["id"].as_str().unwrap().to_string();

    app.post("/api/leads", &owner, json!({"name": "Walk-in Wendy", "phone": "9000000061"}))
        .await;

    let (status, body) = app
        .put(
            &format!("/api/leads/{lead_id}"),
            &owner,
            json!({"status": "trial", "followUpDate": "2025-06-01"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["lead"]["status"], "trial");
    assert_eq!(body["lead"]["followUpDate"], "2025-06-01");

    let (_, body) = app.get("/api/leads?status=trial", &owner).await;
    assert_eq!(body["leads"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], 1);

    let (_, body) = app.get("/api/leads?search=wendy", &owner).await;
    assert_eq!(body["leads"][0]["name"], "Walk-in Wendy");

    let (status, body) = app.get("/api/leads?status=sleeping", &owner).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let uri = format!("/api/leads/{lead_id}");
    let (status, _) = app.send(Method::DELETE, &uri, Some(&owner.cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.get(&uri, &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7101);
}

#[tokio::test]
async fn test_trainer_roster() {
    let app = TestApp::new().await;
    let owner = app.register("Iron Temple", "owner@iron.test").await;

    for (name, specialization) in [("Zara", "Yoga"), ("Arjun", "Strength")] {
        let (status, body) = app
            .post(
                "/api/trainers",
                &owner,
                json!({"name": name, "phone": "9000000070", "specialization": specialization}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (_, body) = app.get("/api/trainers", &owner).await;
    let trainers = body["trainers"].as_array().unwrap();
    assert_eq!(trainers[0]["name"], "Arjun");
    assert_eq!(trainers[1]["name"], "Zara");

    let (_, body) = app.get("/api/trainers?search=yoga", &owner).await;
    assert_eq!(body["trainers"].as_array().unwrap().len(), 1);

    let id = trainers[0]["id"].as_str().unwrap().to_string();
    let (status, body) = app
        .put(&format!("/api/trainers/{id}"), &owner, json!({"experienceYears": 6}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["trainer"]["experienceYears"], 6);

    let (status, body) = app.get("/api/trainers/missing", &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7201);
}
