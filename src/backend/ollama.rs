use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::error::{Result, TradusError};
use crate::languages::language_code_to_name;
use super::TranslationBackend;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TranslatedText {
    text: String,
}

/// Ollama LLM backend. The model is asked for `{"text": "..."}` and the
/// source language is left for the model to detect.
pub struct OllamaBackend {
    client: Client,
    endpoint: String,
    model: String,
    target_language: String,
}

impl OllamaBackend {
    pub fn new(client: Client, endpoint: String, model: String, target_language: &str) -> Self {
        Self {
            client,
            endpoint,
            model,
            target_language: target_language.to_string(),
        }
    }

    fn build_prompt(&self, text: &str) -> String {
        let language_name = language_code_to_name(&self.target_language);

        format!(
            "You are a professional translator.\n\
             \n\
             Detect the language of the text and translate it to {} ONLY.\n\
             The target language is: {} (language code: {})\n\
             \n\
             Return ONLY the translation in JSON format as {{\"text\":\"your {} translation here\"}}.\n\
             Do not include any explanations, alternatives, or text in other languages.\n\
             \n\
             [Text to translate]\n\
             {}\n",
            language_name, language_name, self.target_language, language_name, text
        )
    }
}

#[async_trait]
impl TranslationBackend for OllamaBackend {
    async fn translate(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: self.build_prompt(text),
            stream: false,
            format: "json".to_string(),
        };

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Sending translation request to: {}", url);

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TradusError::Backend(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TradusError::RateLimited(format!("Ollama returned {}", status)));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TradusError::Backend(format!(
                "Ollama API error {}: {}", status, error_text
            )));
        }

        let generated: GenerateResponse = response.json().await
            .map_err(|e| TradusError::Backend(format!("Failed to parse response: {}", e)))?;

        let raw_response = generated.response.trim();
        debug!("Raw Ollama response: {}", raw_response);

        parse_generated_text(raw_response)
    }

    async fn check_availability(&self) -> Result<()> {
        let url = format!("{}/api/show", self.endpoint);

        let response = self.client
            .post(&url)
            .json(&json!({ "name": self.model }))
            .send()
            .await
            .map_err(|e| TradusError::Backend(format!("Failed to connect to Ollama: {}", e)))?;

        if response.status().is_success() {
            info!("Ollama model '{}' is available", self.model);
            Ok(())
        } else {
            Err(TradusError::Backend(format!(
                "Ollama model '{}' not found. Please pull the model first: ollama pull {}",
                self.model, self.model
            )))
        }
    }
}

/// Extract the translation from a model response, accepting either the
/// requested JSON envelope or free-form text.
fn parse_generated_text(raw_response: &str) -> Result<String> {
    if raw_response.is_empty() {
        return Err(TradusError::Backend("Empty translation received".to_string()));
    }

    if let Ok(result) = serde_json::from_str::<TranslatedText>(raw_response) {
        let text = result.text.trim();
        if text.is_empty() {
            return Err(TradusError::Backend("Empty translation received".to_string()));
        }
        return Ok(text.to_string());
    }

    Ok(clean_translation_response(raw_response))
}

/// Line openings a chatty model uses for commentary around the translation
const COMMENTARY_PREFIXES: &[&str] = &["Here are", "Here is", "Option", "**Option", "Translation:", "- ", "* "];

fn is_commentary(line: &str) -> bool {
    COMMENTARY_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
        || (line.len() > 4 && line.starts_with("**") && line.ends_with("**"))
}

/// First non-empty line that is not commentary; failing that, the first
/// non-empty line; failing that, the response itself.
fn clean_translation_response(response: &str) -> String {
    let mut candidates = response.lines().map(str::trim).filter(|line| !line.is_empty());
    let first = candidates.clone().next();

    candidates
        .find(|line| !is_commentary(line) && line.chars().count() > 1)
        .or(first)
        .unwrap_or(response)
        .to_string()
}
