//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use terra_server::config::Config;
use terra_server::db::DbService;
use terra_server::services::{MailError, Mailer, ObjectStore, StorageError, UploadedFile};
use terra_server::{AppState, api};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_ID: &str = "admin_1";
pub const ADMIN_INBOX: &str = "events@terrabook.co.za";

/// Records every message; fails delivery when `fail` is set
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        if self.fail {
            return Err(MailError::Delivery("mail relay offline".into()));
        }
        Ok(())
    }
}

/// Keeps uploads in memory and returns fake URLs
#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, folder: &str, file: &UploadedFile) -> Result<String, StorageError> {
        let key = file.object_key(folder)?;
        self.objects.lock().unwrap().push(key.clone());
        Ok(format!("https://cdn.test/{key}"))
    }
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub store: Arc<MemoryStore>,
    _dir: TempDir,
}

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("AUTH_JWT_SECRET", JWT_SECRET),
        ("ADMIN_USER_IDS", ADMIN_ID),
        ("ADMIN_NOTIFY_EMAIL", ADMIN_INBOX),
        ("TRUST_PROXY_HEADERS", "true"),
    ]);
    Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap()
}

/// File-backed database so every pooled connection sees the same data
pub async fn test_db() -> (TempDir, DbService) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("terrabook.db");
    let db = DbService::new(path.to_str().unwrap()).await.unwrap();
    (dir, db)
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_mailer(RecordingMailer::default()).await
}

pub async fn spawn_app_with_mailer(mailer: RecordingMailer) -> TestApp {
    let (dir, db) = test_db().await;
    let mailer = Arc::new(mailer);
    let store = Arc::new(MemoryStore::default());
    let state = AppState::from_parts(test_config(), db.pool, mailer.clone(), store.clone());
    TestApp {
        router: api::build_app(state.clone()),
        state,
        mailer,
        store,
        _dir: dir,
    }
}

pub fn token(sub: &str) -> String {
    let claims = json!({
        "sub": sub,
        "email": format!("{sub}@example.org"),
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        self.send(request("GET", uri, user).body(Body::empty()).unwrap())
            .await
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        user: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let req = request(method, uri, user)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    pub async fn multipart(
        &self,
        uri: &str,
        user: Option<&str>,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &[u8])],
    ) -> (StatusCode, Value) {
        let boundary = "terrabook-test-boundary";
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (field, file_name, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let req = request("POST", uri, user)
            .header(
                http::header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    /// Register a lodge for `owner` and return its id
    pub async fn register_lodge(&self, owner: &str) -> i64 {
        let (status, body) = self
            .json(
                "POST",
                "/api/accommodations",
                Some(owner),
                json!({
                    "propertyType": "lodge",
                    "name": "Fynbos Eco Lodge",
                    "email": "stay@fynbos.co.za",
                    "city": "Stellenbosch",
                    "province": "Western Cape",
                    "amenities": ["solar power", "greywater"],
                    "acceptsTerms": true
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Create a room through the multipart endpoint and return its id
    pub async fn create_room(&self, owner: &str, price: &str) -> i64 {
        let (status, body) = self
            .multipart(
                "/api/rooms",
                Some(owner),
                &[
                    ("name", "Protea Room"),
                    ("type", "Double"),
                    ("pricePerNight", price),
                    ("amenities", "wifi, fireplace"),
                ],
                &[("images", "protea.jpg", b"jpeg-bytes")],
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }
}

fn request(method: &str, uri: &str, user: Option<&str>) -> http::request::Builder {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", "203.0.113.7");
    if let Some(user) = user {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token(user)));
    }
    builder
}
