use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::notification::PushNotification;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmRequest {
    pub message: FcmMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmMessage {
    pub token: String,
    pub notification: FcmNotification,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

impl FcmMessage {
    pub fn new(token: &str, notification: &PushNotification) -> Self {
        Self {
            token: token.to_string(),
            notification: FcmNotification {
                title: notification.title.clone(),
                body: notification.body.clone(),
            },
            data: Some(notification.data.clone()),
        }
    }
}
