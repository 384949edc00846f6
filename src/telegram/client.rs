//! Bot API HTTP client

use super::types::{InlineKeyboardMarkup, OutgoingMessage};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Update kinds requested at webhook registration. Everything else is
/// filtered out server-side so the webhook only ever sees what it handles.
const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("bot api request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("bot api rejected call: {0}")]
    Api(String),
}

/// Envelope every Bot API method responds with.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Client for the Telegram Bot HTTP API.
pub struct BotApi {
    client: Client,
    base_url: String,
}

impl BotApi {
    pub fn new(token: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("https://api.telegram.org/bot{token}"),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &impl Serialize,
    ) -> Result<T, TransportError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(payload)
            .send()
            .await?;

        let body: ApiResponse<T> = response.json().await?;
        if body.ok {
            body.result
                .ok_or_else(|| TransportError::Api(format!("{method}: empty result")))
        } else {
            Err(TransportError::Api(
                body.description
                    .unwrap_or_else(|| format!("{method}: no description")),
            ))
        }
    }

    /// Send a text message, optionally with an inline keyboard.
    ///
    /// Messages are sent with Markdown parse mode throughout.
    pub async fn send_message(&self, message: &OutgoingMessage) -> Result<(), TransportError> {
        #[derive(Serialize)]
        struct Payload<'a> {
            chat_id: i64,
            text: &'a str,
            parse_mode: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            message_thread_id: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            reply_markup: Option<&'a InlineKeyboardMarkup>,
        }

        let _: serde_json::Value = self
            .call(
                "sendMessage",
                &Payload {
                    chat_id: message.chat_id,
                    text: &message.text,
                    parse_mode: "Markdown",
                    message_thread_id: message.thread_id,
                    reply_markup: message.keyboard.as_ref(),
                },
            )
            .await?;
        Ok(())
    }

    /// Register the webhook callback URL, discarding any queued updates.
    pub async fn set_webhook(&self, url: &str) -> Result<(), TransportError> {
        #[derive(Serialize)]
        struct Payload<'a> {
            url: &'a str,
            drop_pending_updates: bool,
            allowed_updates: &'a [&'a str],
        }

        let _: bool = self
            .call(
                "setWebhook",
                &Payload {
                    url,
                    drop_pending_updates: true,
                    allowed_updates: ALLOWED_UPDATES,
                },
            )
            .await?;
        Ok(())
    }

    /// Remove any previously registered webhook.
    pub async fn delete_webhook(&self) -> Result<(), TransportError> {
        let _: bool = self
            .call("deleteWebhook", &serde_json::json!({}))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_surfaces_description() {
        let body: ApiResponse<bool> =
            serde_json::from_str(r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#)
                .unwrap();
        assert!(!body.ok);
        assert_eq!(body.description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn api_success_carries_result() {
        let body: ApiResponse<bool> =
            serde_json::from_str(r#"{"ok":true,"result":true}"#).unwrap();
        assert!(body.ok);
        assert_eq!(body.result, Some(true));
    }
}
