use tracing::info;

use crate::config::SubtitleOptions;
use crate::translate::{translate_unit, TranslatedDocument, TranslationSummary, Translator, UnitOutcome};

/// Separator between timestamps on an SRT timing line
const TIMING_ARROW: &str = "-->";

/// Syntactic role of a subtitle line. Nothing is parsed beyond this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only
    Blank,
    /// Caption sequence number, digits of any script
    Index,
    /// `00:00:01,000 --> 00:00:02,000`
    TimingCue,
    /// Anything else: caption text
    Text,
}

impl LineKind {
    pub fn is_translatable(self) -> bool {
        self == LineKind::Text
    }
}

/// Classify one line (without its line terminator)
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.chars().all(char::is_numeric) {
        LineKind::Index
    } else if line.contains(TIMING_ARROW) {
        LineKind::TimingCue
    } else {
        LineKind::Text
    }
}

/// Translate the text lines of an SRT document, leaving index, timing and
/// blank lines untouched.
///
/// Lines are split on `\n`; a `\r` ending a line is kept with that line, so
/// LF, CRLF and mixed files come back with the same terminators. The output
/// always has the same number of lines as the input.
pub async fn translate_subtitle(
    content: &str,
    translator: &Translator,
    options: &SubtitleOptions,
) -> TranslatedDocument {
    let mut summary = TranslationSummary::default();
    let mut output = Vec::new();

    for (idx, raw_line) in content.split('\n').enumerate() {
        let (line, terminator) = match raw_line.strip_suffix('\r') {
            Some(body) => (body, "\r"),
            None => (raw_line, ""),
        };

        if !classify_line(line).is_translatable() {
            output.push(raw_line.to_string());
            continue;
        }

        let outcome = translate_unit(translator, line.trim()).await;
        let translated = match &outcome {
            UnitOutcome::Translated(text) if options.preserve_whitespace => {
                rewrap_whitespace(line, text)
            }
            UnitOutcome::Translated(text) => text.clone(),
            UnitOutcome::FellBack { .. } => line.to_string(),
        };
        summary.record((idx + 1).to_string(), &outcome);

        output.push(format!("{}{}", translated, terminator));
    }

    info!("Subtitle translation to {} finished: {}", translator.target_language(), summary);

    TranslatedDocument {
        content: output.join("\n"),
        summary,
    }
}

/// Put the leading/trailing whitespace of `original` around `translated`
fn rewrap_whitespace(original: &str, translated: &str) -> String {
    let leading = &original[..original.len() - original.trim_start().len()];
    let trailing = &original[original.trim_end().len()..];
    format!("{}{}{}", leading, translated, trailing)
}
