//! Helpers for driving the real router in tests.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::ServerSettings;
use crate::storage::DbConnection;
use crate::{create_router, AppState};

/// Router backed by a fresh in-memory database
pub async fn test_app() -> Router {
    let db = DbConnection::init_test()
        .await
        .expect("Failed to create test database");
    let server = ServerSettings {
        host: "127.0.0.1".to_string(),
        port: 0,
        allowed_origin: "http://localhost:8080".to_string(),
    };
    create_router(AppState::new(Arc::new(db)), &server).expect("Failed to build router")
}

/// Send one request and decode the JSON body, `Value::Null` when empty
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router should not fail");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

/// Create a patient through the API and return its id
pub async fn create_patient(app: &Router, first_name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/patients",
        Some(serde_json::json!({
            "firstName": first_name,
            "lastName": "Patient",
            "dateOfBirth": "1990-01-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("Created patient should have an id")
}

/// Local timestamp `hours_ago` hours before now, in wire format
pub fn hours_ago(hours: i64) -> String {
    (chrono::Local::now().naive_local() - chrono::Duration::hours(hours))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// Create a reading through the API and return its id
pub async fn create_reading(app: &Router, patient_id: i64, level: f64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/patients/{}/readings", patient_id),
        Some(serde_json::json!({
            "timestamp": hours_ago(1),
            "level": level,
            "unit": "mg/dL",
            "patientId": patient_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("Created reading should have an id")
}

/// Log lines written while a [`capture_logs`] guard is alive
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("Log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("Log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Record everything at `level` and above on the current thread
pub fn capture_logs(level: Level) -> (DefaultGuard, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    (tracing::subscriber::set_default(subscriber), logs)
}
