use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use gcp_auth::TokenProvider;
use reqwest::Client;
use tracing::{debug, info};

use crate::{
    clients::firebase,
    config::Config,
    models::fcm::{FcmMessage, FcmRequest},
};

const FCM_SCOPES: &[&str] = &["https://www.googleapis.com/auth/firebase.messaging"];

/// One message to one token. The dispatch pipeline depends only on this
/// seam, so tests can observe sends without talking to FCM.
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, message: FcmMessage, trace_id: &str) -> Result<(), Error>;
}

pub struct FcmClient {
    http_client: Client,
    endpoint: String,
    fcm_project_id: String,
    service_account: Option<String>,
}

impl FcmClient {
    pub fn new(config: &Config) -> Self {
        info!(project_id = %config.fcm_project_id, "FCM client initialized");

        Self {
            http_client: Client::new(),
            endpoint: config.fcm_endpoint.clone(),
            fcm_project_id: config.fcm_project_id.clone(),
            service_account: config.firebase_service_account.clone(),
        }
    }
}

#[async_trait]
impl PushSender for FcmClient {
    async fn send(&self, message: FcmMessage, trace_id: &str) -> Result<(), Error> {
        debug!(trace_id, "Sending FCM push notification");

        let account = firebase::credentials(self.service_account.as_deref())
            .await
            .ok_or_else(|| anyhow!("Firebase service account is not initialized"))?;

        let token = account.token(FCM_SCOPES).await?;

        let url = format!(
            "{}/v1/projects/{}/messages:send",
            self.endpoint, self.fcm_project_id
        );

        let request = FcmRequest { message };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token.as_str())
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            info!(trace_id, "FCM push notification sent successfully");
            Ok(())
        } else {
            let error_text = response.text().await?;
            Err(anyhow!("FCM request failed: {}", error_text))
        }
    }
}
