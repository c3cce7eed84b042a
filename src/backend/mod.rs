// Translation backends
//
// Each backend is bound to one target language at construction and always
// lets the service detect the source language:
// - Google: Google Translate web endpoint
// - Ollama: local LLM prompted for a JSON-wrapped translation

pub mod google;
pub mod ollama;

use async_trait::async_trait;
use std::time::Duration;
use reqwest::Client;

use crate::config::{BackendConfig, BackendKind};
use crate::error::{Result, TradusError};

/// Opaque translation capability: source text in, translated text out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` into the backend's target language
    async fn translate(&self, text: &str) -> Result<String>;

    /// Check that the backend is reachable and usable
    async fn check_availability(&self) -> Result<()>;
}

/// Factory for creating backend instances
pub struct BackendFactory;

impl BackendFactory {
    /// Create a backend bound to `target_language` according to the configuration
    pub fn create_backend(
        config: &BackendConfig,
        target_language: &str,
    ) -> Result<Box<dyn TranslationBackend>> {
        let client = build_client(config.timeout_secs)?;

        match config.provider {
            BackendKind::Google => Ok(Box::new(google::GoogleBackend::new(
                client,
                config.resolved_endpoint(),
                target_language,
            ))),
            BackendKind::Ollama => Ok(Box::new(ollama::OllamaBackend::new(
                client,
                config.resolved_endpoint(),
                config.model.clone(),
                target_language,
            ))),
        }
    }
}

fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .map_err(|e| TradusError::Config(format!("Failed to create HTTP client: {}", e)))
}
