use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::backend::{BackendFactory, TranslationBackend};
use crate::config::BackendConfig;
use crate::error::{Result, TradusError};
use super::Translator;

/// Builds a backend bound to the given target language
pub type BackendBuilder = Box<dyn Fn(&str) -> Result<Box<dyn TranslationBackend>> + Send + Sync>;

/// Per-session cache of translators, one per target language code.
///
/// Handles are built on first request and kept for the provider's lifetime;
/// there is no eviction.
pub struct TranslatorProvider {
    builder: BackendBuilder,
    translators: Mutex<HashMap<String, Arc<Translator>>>,
}

impl TranslatorProvider {
    pub fn new(builder: BackendBuilder) -> Self {
        Self {
            builder,
            translators: Mutex::new(HashMap::new()),
        }
    }

    /// Provider building backends from the configuration
    pub fn from_config(config: BackendConfig) -> Self {
        Self::new(Box::new(move |target_language: &str| {
            BackendFactory::create_backend(&config, target_language)
        }))
    }

    /// Return the translator for `target_language`, building it on first use.
    ///
    /// The code is not checked against any language list; an unknown code
    /// reaches the backend and fails there, per unit.
    pub fn get_translator(&self, target_language: &str) -> Result<Arc<Translator>> {
        let code = target_language.trim();
        if code.is_empty() {
            return Err(TradusError::Config("Target language code must not be empty".to_string()));
        }

        // Held across construction so a code is never built twice
        let mut translators = self.translators.lock();
        if let Some(translator) = translators.get(code) {
            debug!("Reusing translator for '{}'", code);
            return Ok(translator.clone());
        }

        info!("Creating translator for target language '{}'", code);
        let backend = (self.builder)(code)?;
        let translator = Arc::new(Translator::new(code, backend));
        translators.insert(code.to_string(), translator.clone());

        Ok(translator)
    }

    /// Language codes with a live translator, sorted
    pub fn cached_languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.translators.lock().keys().cloned().collect();
        codes.sort();
        codes
    }
}
