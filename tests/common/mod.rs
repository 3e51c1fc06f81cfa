#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use engagement_push::{
    api::{self, AppState},
    clients::{database::ProfileStore, fcm::PushSender, health::HealthChecker},
    config::Config,
    models::{fcm::FcmMessage, profile::Profile},
};

// ---------------------------------------------------------------------------
// Mocks for the two collaborators behind the dispatch pipelines
// ---------------------------------------------------------------------------

/// Profile store backed by a fixed row set. Rows come back in insertion
/// order regardless of the requested id order, which lets tests exercise
/// the role re-association logic.
pub struct InMemoryProfiles {
    rows: Vec<Profile>,
    fail: bool,
}

#[async_trait]
impl ProfileStore for InMemoryProfiles {
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, Error> {
        if self.fail {
            return Err(anyhow!("profile lookup failed"));
        }

        Ok(self
            .rows
            .iter()
            .filter(|row| ids.contains(&row.id))
            .cloned()
            .collect())
    }
}

/// Push sender that records every attempted send and can be told to fail
/// on the nth attempt (0-based). The failed attempt is still recorded, so
/// tests can distinguish "failed" from "never attempted".
pub struct RecordingSender {
    attempts: Mutex<Vec<FcmMessage>>,
    fail_on: Option<usize>,
}

impl RecordingSender {
    pub fn new(fail_on: Option<usize>) -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            fail_on,
        }
    }

    pub fn attempts(&self) -> Vec<FcmMessage> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl PushSender for RecordingSender {
    async fn send(&self, message: FcmMessage, _trace_id: &str) -> Result<(), Error> {
        let mut attempts = self.attempts.lock().unwrap();
        let attempt = attempts.len();
        attempts.push(message);

        if self.fail_on == Some(attempt) {
            return Err(anyhow!("simulated FCM failure"));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TestApp — the real router over mock collaborators
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub sender: Arc<RecordingSender>,
}

pub struct TestResponse {
    pub status: StatusCode,
    body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn error_message(&self) -> String {
        self.json()["error"].as_str().unwrap_or("").to_string()
    }
}

impl TestApp {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self::build(profiles, false, None)
    }

    pub fn with_failing_store() -> Self {
        Self::build(Vec::new(), true, None)
    }

    pub fn with_failing_sender(profiles: Vec<Profile>, fail_on: usize) -> Self {
        Self::build(profiles, false, Some(fail_on))
    }

    fn build(profiles: Vec<Profile>, fail_store: bool, fail_send_on: Option<usize>) -> Self {
        let sender = Arc::new(RecordingSender::new(fail_send_on));

        let state = Arc::new(AppState {
            profiles: Arc::new(InMemoryProfiles {
                rows: profiles,
                fail: fail_store,
            }),
            push: sender.clone(),
            health_checker: HealthChecker::new(test_config()),
        });

        Self {
            router: api::router(state),
            sender,
        }
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();

        TestResponse { status, body }
    }
}

fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost:5432/unused".to_string(),
        fcm_project_id: "test-project".to_string(),
        fcm_endpoint: "http://localhost:0".to_string(),
        firebase_service_account: None,
        server_port: 0,
    }
}

pub fn profile(id: &str, full_name: Option<&str>, fcm_token: Option<&str>) -> Profile {
    Profile {
        id: id.to_string(),
        full_name: full_name.map(str::to_string),
        fcm_token: fcm_token.map(str::to_string),
    }
}
