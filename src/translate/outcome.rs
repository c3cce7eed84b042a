use std::fmt;
use tracing::warn;

use super::Translator;

/// Result of translating one unit (a subtitle line or a JSON string leaf).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Translated(String),
    /// The backend failed; the original text is kept.
    FellBack { reason: String },
}

/// One unit that kept its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    /// 1-based line number for subtitles, JSON Pointer for JSON documents
    pub location: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSummary {
    pub total_units: usize,
    pub translated: usize,
    pub fell_back: usize,
    pub failures: Vec<UnitFailure>,
}

impl TranslationSummary {
    /// Record `outcome` for the unit at `location`
    pub fn record(&mut self, location: impl Into<String>, outcome: &UnitOutcome) {
        self.total_units += 1;
        match outcome {
            UnitOutcome::Translated(_) => self.translated += 1,
            UnitOutcome::FellBack { reason } => {
                self.fell_back += 1;
                self.failures.push(UnitFailure {
                    location: location.into(),
                    reason: reason.clone(),
                });
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.fell_back == 0
    }
}

impl fmt::Display for TranslationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} units, {} translated, {} kept in source language",
            self.total_units, self.translated, self.fell_back
        )
    }
}

/// A fully reassembled document plus what happened to its units
#[derive(Debug, Clone)]
pub struct TranslatedDocument {
    pub content: String,
    pub summary: TranslationSummary,
}

/// Translate a single unit, absorbing any backend failure.
///
/// Never fails: an error from the translator becomes `FellBack` and the
/// caller keeps its original text for this unit only.
pub async fn translate_unit(translator: &Translator, text: &str) -> UnitOutcome {
    match translator.translate(text).await {
        Ok(translation) => UnitOutcome::Translated(translation),
        Err(e) => {
            warn!("Translation failed, keeping original text: {}", e);
            UnitOutcome::FellBack { reason: e.to_string() }
        }
    }
}
