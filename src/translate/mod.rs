// Translation capability shared by the document translators
//
// - provider: per-session cache of translators keyed by target language
// - outcome: per-unit failure isolation and the aggregate summary

pub mod outcome;
pub mod provider;

pub use outcome::*;
pub use provider::*;

use tracing::debug;

use crate::backend::TranslationBackend;
use crate::error::Result;

/// Translator handle bound to one target language.
///
/// The source language is always detected by the backend.
pub struct Translator {
    target_language: String,
    backend: Box<dyn TranslationBackend>,
}

impl Translator {
    pub fn new(target_language: impl Into<String>, backend: Box<dyn TranslationBackend>) -> Self {
        Self {
            target_language: target_language.into(),
            backend,
        }
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Translate one unit of text. Fails with a backend error when the
    /// backend is unreachable, rate limited, or rejects the input.
    pub async fn translate(&self, text: &str) -> Result<String> {
        debug!("Translating to {}: {}", self.target_language, text);
        self.backend.translate(text).await
    }

    pub async fn check_availability(&self) -> Result<()> {
        self.backend.check_availability().await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic backends for the document translator tests.

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::backend::TranslationBackend;
    use crate::error::{Result, TradusError};
    use super::Translator;

    pub struct FnBackend {
        f: fn(&str) -> Result<String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TranslationBackend for FnBackend {
        async fn translate(&self, text: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.f)(text)
        }

        async fn check_availability(&self) -> Result<()> {
            Ok(())
        }
    }

    pub fn translator_with(f: fn(&str) -> Result<String>) -> (Translator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = FnBackend { f, calls: calls.clone() };
        (Translator::new("xx", Box::new(backend)), calls)
    }

    pub fn uppercase() -> Translator {
        translator_with(|text| Ok(text.to_uppercase())).0
    }

    pub fn identity() -> Translator {
        translator_with(|text| Ok(text.to_string())).0
    }

    pub fn failing() -> Translator {
        translator_with(|_| Err(TradusError::Backend("backend unreachable".to_string()))).0
    }
}
