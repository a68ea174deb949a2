//! SMS delivery through the Africa's Talking messaging API.

use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Deserialize;
use tracing::debug;

use crate::notifications::{
    dispatcher::NotificationChannel, errors::NotificationError, events::NotificationEvent,
};

/// Default messaging endpoint (sandbox).
pub const DEFAULT_SMS_API_URL: &str = "https://api.sandbox.africastalking.com/version1/messaging";

#[derive(Clone)]
pub struct SmsConfig {
    /// Messaging endpoint URL.
    pub api_url: String,

    /// Account username.
    pub username: String,

    /// API key sent in the `apiKey` header.
    pub api_key: String,
}

impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SmsChannel {
    config: SmsConfig,
    http: Client,
}

impl SmsChannel {
    #[must_use]
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagingResponse {
    #[serde(rename = "SMSMessageData")]
    sms_message_data: MessageData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageData {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl NotificationChannel for SmsChannel {
    fn name(&self) -> &'static str {
        "sms"
    }

    async fn send(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        let NotificationEvent::OrderPlaced(order) = event;

        if order.customer_phone.is_empty() {
            return Err(NotificationError::MissingRecipient("phone number"));
        }

        let text = event.sms_text();

        let form = [
            ("username", self.config.username.as_str()),
            ("to", order.customer_phone.as_str()),
            ("message", text.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.api_url)
            .header("apiKey", &self.config.api_key)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotificationError::UnexpectedResponse(format!(
                "sms request failed with status {status}: {text}"
            )));
        }

        let parsed: MessagingResponse = response.json().await?;

        debug!(summary = %parsed.sms_message_data.message, "sms gateway accepted message");

        Ok(())
    }
}
