use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TradusError};
use super::TranslationBackend;

/// Longest text the web endpoint accepts in one request
pub const MAX_TEXT_CHARS: usize = 5000;

/// Google Translate web endpoint, source language detected automatically
pub struct GoogleBackend {
    client: Client,
    endpoint: String,
    target_language: String,
}

impl GoogleBackend {
    pub fn new(client: Client, endpoint: String, target_language: &str) -> Self {
        Self {
            client,
            endpoint,
            target_language: target_language.to_string(),
        }
    }
}

#[async_trait]
impl TranslationBackend for GoogleBackend {
    async fn translate(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let length = text.chars().count();
        if length > MAX_TEXT_CHARS {
            return Err(TradusError::Backend(format!(
                "Text of {} characters exceeds the {} character limit",
                length, MAX_TEXT_CHARS
            )));
        }

        let url = format!("{}/translate_a/single", self.endpoint);
        debug!("Sending translation request to: {}", url);

        let response = self.client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", self.target_language.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| TradusError::Backend(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TradusError::RateLimited(format!(
                "Google Translate returned {}", status
            )));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TradusError::Backend(format!(
                "Google Translate error {}: {}", status, error_text
            )));
        }

        let body: Value = response.json().await
            .map_err(|e| TradusError::Backend(format!("Failed to parse response: {}", e)))?;

        extract_translation(&body)
    }

    async fn check_availability(&self) -> Result<()> {
        self.translate("hello").await.map(|_| ())
    }
}

/// Join the translated sentence fragments of a `translate_a/single` response.
///
/// The body looks like `[[["Hola","Hello",null,null,10], ...], null, "en", ...]`.
fn extract_translation(body: &Value) -> Result<String> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TradusError::Backend("Unexpected response shape".to_string()))?;

    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TradusError::Backend("Empty translation received".to_string()));
    }

    Ok(translated)
}
