//! Integration tests for physical assessments and anamnesis

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_assessment_with_skin_folds_stores_body_composition() {
    let app = common::TestApp::new().await;
    let student = app.create_user("student").await;
    let token = Some(student.token.as_str());

    let (status, created) = app
        .post(
            "/api/v1/physical-assessments",
            token,
            json!({
                "assessed_at": "2024-03-01",
                "weight_kg": 80.0,
                "height_cm": 180.0,
                "age": 30,
                "sex": "male",
                "perimeters": { "waist": 80.0, "hip": 100.0 },
                "skin_folds": {
                    "chest": 10.0, "midaxillary": 10.0, "triceps": 10.0,
                    "subscapular": 10.0, "abdominal": 10.0, "suprailiac": 10.0,
                    "thigh": 10.0
                }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);
    assert_eq!(created["waist_hip_ratio"], 0.8);
    let fat = created["body_composition"]["body_fat_percent"].as_f64().unwrap();
    assert!((fat - 10.21).abs() < 0.05);

    let path = format!(
        "/api/v1/physical-assessments/{}",
        created["id"].as_str().unwrap()
    );
    let (status, fetched) = app.get(&path, token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["body_composition"], created["body_composition"]);
    assert_eq!(fetched["skin_folds"]["thigh"], 10.0);

    let other = app.create_user("student").await;
    let (status, body) = app.get(&path, Some(&other.token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["physical assessment not found"] }));

    let (status, _) = app.delete(&path, token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, list) = app.get("/api/v1/physical-assessments", token).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_assessment_without_skin_folds_has_no_composition() {
    let app = common::TestApp::new().await;
    let student = app.create_user("student").await;

    let (status, created) = app
        .post(
            "/api/v1/physical-assessments",
            Some(&student.token),
            json!({
                "assessed_at": "2024-01-15",
                "weight_kg": 62.5,
                "height_cm": 165.0,
                "age": 27,
                "sex": "female"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(created["body_composition"].is_null());
    assert!(created["bmi"].as_f64().unwrap() > 22.0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_anamnesis_answers_are_replaced_not_duplicated() {
    let app = common::TestApp::new().await;
    let trainer = app.create_user("trainer").await;
    let student = app.create_user("student").await;

    let (status, body) = app
        .post(
            "/api/v1/anamnesis-questions",
            Some(&student.token),
            json!({ "question": "Any injuries?" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["only trainers can perform this action"] }));

    let (status, question) = app
        .post(
            "/api/v1/anamnesis-questions",
            Some(&trainer.token),
            json!({ "question": "Any injuries?" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let answer_path = format!(
        "/api/v1/anamnesis-questions/{}/answer",
        question["id"].as_str().unwrap()
    );

    for answer in ["Knee, 2019", "Knee, fully recovered"] {
        let (status, _) = app
            .put(&answer_path, Some(&student.token), json!({ "answer": answer }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, answers) = app.get("/api/v1/anamnesis-answers", Some(&student.token)).await;
    assert_eq!(status, StatusCode::OK);
    let answers = answers.as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["answer"], "Knee, fully recovered");
    assert_eq!(answers[0]["question"], "Any injuries?");

    let missing = format!("/api/v1/anamnesis-questions/{}/answer", uuid::Uuid::new_v4());
    let (status, body) = app
        .put(&missing, Some(&student.token), json!({ "answer": "n/a" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["anamnesis question not found"] }));
}
