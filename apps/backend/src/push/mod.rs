//! Web Push delivery.
//!
//! Handlers depend on the [`PushSender`] trait so tests can swap in a
//! recording sender; production uses [`WebPushSender`] (VAPID-signed,
//! aes128gcm-encrypted payloads).

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushMessageBuilder,
};

use crate::config::push::PushConfig;

pub const DEFAULT_URL: &str = "/";
pub const DEFAULT_ICON: &str = "/vercel.svg";

#[derive(Debug, Error)]
pub enum PushError {
    #[error("invalid subscription: {0}")]
    InvalidSubscription(String),
    #[error("VAPID signing failed: {0}")]
    Vapid(String),
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Notification payload as the service worker expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: String,
    pub message: String,
    pub url: String,
    pub icon: String,
}

impl PushMessage {
    pub fn new(title: String, message: String, url: Option<String>, icon: Option<String>) -> Self {
        Self {
            title,
            message,
            url: url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
            icon: icon
                .filter(|i| !i.is_empty())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubscriptionKeys {
    p256dh: String,
    auth: String,
}

/// Where to deliver: the browser's push endpoint plus its encryption keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTarget {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

impl PushTarget {
    /// Read a browser `PushSubscription` JSON object
    /// (`{endpoint, keys: {p256dh, auth}}`).
    pub fn from_subscription(subscription: &Value) -> Result<Self, PushError> {
        #[derive(Deserialize)]
        struct Raw {
            endpoint: String,
            keys: SubscriptionKeys,
        }

        let raw: Raw = serde_json::from_value(subscription.clone())
            .map_err(|e| PushError::InvalidSubscription(e.to_string()))?;
        if raw.endpoint.is_empty() {
            return Err(PushError::InvalidSubscription("empty endpoint".into()));
        }

        Ok(Self {
            endpoint: raw.endpoint,
            p256dh: raw.keys.p256dh,
            auth: raw.keys.auth,
        })
    }
}

#[async_trait]
pub trait PushSender: Send + Sync + fmt::Debug {
    async fn send(&self, target: &PushTarget, message: &PushMessage) -> Result<(), PushError>;
}

/// VAPID-authenticated sender backed by an HTTP client built once at startup.
pub struct WebPushSender {
    config: PushConfig,
    client: IsahcWebPushClient,
}

impl WebPushSender {
    pub fn new(config: PushConfig) -> Result<Self, PushError> {
        let client = IsahcWebPushClient::new().map_err(|e| PushError::Delivery(e.to_string()))?;
        Ok(Self { config, client })
    }
}

impl fmt::Debug for WebPushSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebPushSender")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PushSender for WebPushSender {
    async fn send(&self, target: &PushTarget, message: &PushMessage) -> Result<(), PushError> {
        let subscription =
            SubscriptionInfo::new(&target.endpoint, &target.p256dh, &target.auth);

        let mut signature = VapidSignatureBuilder::from_base64(&self.config.private_key, &subscription)
            .map_err(|e| PushError::Vapid(e.to_string()))?;
        signature.add_claim("sub", self.config.subject.as_str());
        let signature = signature
            .build()
            .map_err(|e| PushError::Vapid(e.to_string()))?;

        let payload =
            serde_json::to_vec(message).map_err(|e| PushError::Delivery(e.to_string()))?;

        let mut builder = WebPushMessageBuilder::new(&subscription);
        builder.set_payload(ContentEncoding::Aes128Gcm, &payload);
        builder.set_vapid_signature(signature);
        let request = builder
            .build()
            .map_err(|e| PushError::InvalidSubscription(e.to_string()))?;

        self.client
            .send(request)
            .await
            .map_err(|e| PushError::Delivery(e.to_string()))
    }
}
