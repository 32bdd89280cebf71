mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn new_project_has_no_tasks() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(
            Method::POST,
            "/api/v1/projects",
            json!({ "name": "Voyager", "description": "Outer planets", "tasks": [{"title": "ignored"}] }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["name"], "Voyager");
    assert_eq!(body["data"]["tasks"], json!([]));
}

#[tokio::test]
async fn project_nests_its_tasks() {
    let app = TestApp::new().await;
    let bob = app.create_user("bob").await;
    let project = app.create_project("Pioneer").await;
    let other = app.create_project("Viking").await;
    app.create_task("Telemetry", project, bob).await;
    app.create_task("Antenna", project, bob).await;
    app.create_task("Lander", other, bob).await;

    let (status, body) = app.get(&format!("/api/v1/projects/{}", project)).await;

    assert_eq!(status, StatusCode::OK);
    let tasks = body["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Telemetry");
    assert_eq!(tasks[0]["assigned_to"], "bob");
    assert_eq!(tasks[0]["project"], "Pioneer");

    let (status, body) = app.get("/api/v1/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"][1]["tasks"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .json(Method::POST, "/api/v1/projects", json!({ "name": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"][0], "This field may not be blank.");

    let (status, body) = app
        .json(Method::POST, "/api/v1/projects", json!({ "description": "no name" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"][0], "This field is required.");
}

#[tokio::test]
async fn put_and_patch_update_fields() {
    let app = TestApp::new().await;
    let project = app.create_project("Draft").await;
    let uri = format!("/api/v1/projects/{}", project);

    let (status, body) = app
        .json(Method::PATCH, &uri, json!({ "description": "Now described" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Draft");
    assert_eq!(body["data"]["description"], "Now described");

    let (status, body) = app.json(Method::PUT, &uri, json!({ "description": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"][0], "This field is required.");

    let (status, body) = app
        .json(Method::PUT, &uri, json!({ "name": "Final", "description": "" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Final");
}

#[tokio::test]
async fn deleting_project_removes_its_tasks() {
    let app = TestApp::new().await;
    let bob = app.create_user("bob").await;
    let project = app.create_project("Cancelled").await;
    let task = app.create_task("Never done", project, bob).await;

    let (status, _) = app.delete(&format!("/api/v1/projects/{}", project)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/v1/projects/{}", project)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/api/v1/tasks/{}", task)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn project_can_be_written_from_form_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .multipart(
            Method::POST,
            "/api/v1/projects",
            &[("name", "Gemini"), ("description", "Two-seat capsule")],
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["description"], "Two-seat capsule");

    let id = body["data"]["id"].as_i64().unwrap();
    let (status, body) = app
        .multipart(
            Method::PATCH,
            &format!("/api/v1/projects/{}", id),
            &[("name", "Gemini 2")],
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["name"], "Gemini 2");
    assert_eq!(body["data"]["tasks"], json!([]));
}
