//! Forwards saved orders to the automation webhook.
//!
//! One POST per call, no retries, transport default timeouts. A 2xx answer is
//! accepted whatever its body looks like: JSON objects are read for
//! `display_message`/`message`, anything else becomes `message` verbatim.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::NotificationError,
    models::{CartLine, PaymentMethod},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub payment: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderNotification {
    pub customer: CustomerInfo,
    pub order: OrderDetails,
    pub order_id: i64,
}

/// Normalized webhook reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationResult {
    pub display_message: Option<String>,
    pub message: Option<String>,
}

impl NotificationResult {
    pub fn from_body(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Self {
                display_message: string_field(&map, "display_message"),
                message: string_field(&map, "message"),
            },
            _ => Self {
                display_message: None,
                message: Some(text.to_string()).filter(|t| !t.trim().is_empty()),
            },
        }
    }
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(
        &self,
        order: &OrderNotification,
        summary: &str,
    ) -> Result<NotificationResult, NotificationError>;
}

#[derive(Serialize)]
struct WebhookBody<'a> {
    #[serde(flatten)]
    order: &'a OrderNotification,
    message_summary: &'a str,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn dispatch(
        &self,
        order: &OrderNotification,
        summary: &str,
    ) -> Result<NotificationResult, NotificationError> {
        let body = WebhookBody {
            order,
            message_summary: summary,
            timestamp: Utc::now(),
        };
        tracing::debug!(order_id = order.order_id, "sending order to webhook");

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        tracing::info!(order_id = order.order_id, status = %status, "webhook responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        Ok(NotificationResult::from_body(&text))
    }
}
