use anyhow::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::Messenger;
use crate::error::WatchError;

/// Telegram Bot API `sendMessage` request body
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Telegram Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram bot client
pub struct TelegramBot {
    client: Client,
    api_base: String,
    api_key: String,
}

impl TelegramBot {
    pub fn new(api_base: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::NotifyError(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.api_key, method)
    }
}

impl Messenger for TelegramBot {
    fn send(&self, chat_id: &str, text: &str, parse_mode: &str) -> Result<()> {
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
        };

        // the URL embeds the bot token, keep it out of errors and logs
        let resp = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .map_err(|e| {
                WatchError::NotifyError(format!("sendMessage request failed: {}", e.without_url()))
            })?;

        let status = resp.status();
        let api: Option<ApiResponse> = resp.json().ok();
        check_response(status.as_u16(), api)?;
        debug!("Delivered message to chat {}", chat_id);
        Ok(())
    }
}

fn check_response(status: u16, api: Option<ApiResponse>) -> Result<()> {
    match api {
        Some(ApiResponse { ok: true, .. }) if (200..300).contains(&status) => Ok(()),
        Some(ApiResponse { description, .. }) => Err(WatchError::NotifyError(format!(
            "Telegram rejected message ({}): {}",
            status,
            description.unwrap_or_else(|| "no description".to_string())
        ))
        .into()),
        None => Err(WatchError::NotifyError(format!(
            "unreadable Telegram response ({})",
            status
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url_trims_trailing_slash() {
        let bot = TelegramBot::new("https://api.telegram.org/", "123:abc", Duration::from_secs(5))
            .unwrap();
        assert_eq!(
            bot.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = SendMessageRequest {
            chat_id: "-1001",
            text: "No new jobs!",
            parse_mode: "Markdown",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "chat_id": "-1001",
                "text": "No new jobs!",
                "parse_mode": "Markdown"
            })
        );
    }

    #[test]
    fn test_check_response_ok() {
        let api: ApiResponse = serde_json::from_str(r#"{"ok":true,"result":{}}"#).unwrap();
        assert!(check_response(200, Some(api)).is_ok());
    }

    #[test]
    fn test_check_response_carries_description() {
        let api: ApiResponse =
            serde_json::from_str(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#)
                .unwrap();
        let err = check_response(400, Some(api)).unwrap_err();
        assert!(err.to_string().contains("chat not found"));
    }

    #[test]
    fn test_check_response_unreadable_body() {
        let err = check_response(502, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WatchError>(),
            Some(WatchError::NotifyError(_))
        ));
    }
}
