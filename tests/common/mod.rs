//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use taskboard::infrastructure::database::migrator::Migrator;
use taskboard::{create_api_router, init_database, AppConfig, DatabaseConfig};

pub const HOST: &str = "testserver";
pub const BOUNDARY: &str = "XBOUNDARY";

/// A router over a fresh in-memory database. The media directory lives as
/// long as the returned value.
pub struct TestApp {
    pub router: Router,
    pub media: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let media = tempfile::tempdir().unwrap();
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let mut config = AppConfig::default();
        config.media.root = media.path().to_path_buf();
        config.security.password_hash_cost = bcrypt::MIN_COST;

        Self {
            router: create_api_router(db, &config),
            media,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::HOST, HOST)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .header(header::HOST, HOST)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::HOST, HOST)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Send text fields plus an optional `avatar` file part as multipart.
    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        fields: &[(&str, &str)],
        avatar: Option<(&str, &[u8])>,
    ) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::HOST, HOST)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body(fields, avatar)))
                .unwrap(),
        )
        .await
    }

    /// Create a user through the API and return its id.
    pub async fn create_user(&self, username: &str) -> i32 {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/v1/users",
                serde_json::json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "s3cret-pass",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_i64().unwrap() as i32
    }

    /// Create a project through the API and return its id.
    pub async fn create_project(&self, name: &str) -> i32 {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/v1/projects",
                serde_json::json!({ "name": name, "description": "" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_i64().unwrap() as i32
    }

    /// Create a task through the API and return its id.
    pub async fn create_task(&self, title: &str, project: i32, assignee: i32) -> i32 {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/v1/tasks",
                serde_json::json!({
                    "title": title,
                    "description": "",
                    "project": project,
                    "assigned_to": assignee,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_i64().unwrap() as i32
    }
}

fn multipart_body(fields: &[(&str, &str)], avatar: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = avatar {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
