use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::info;

use crate::error::{Result, TradusError};
use crate::translate::{translate_unit, TranslatedDocument, TranslationSummary, Translator, UnitOutcome};

/// Indentation of the re-serialized document
const INDENT: &[u8] = b"    ";

/// Translate every string value of a JSON document.
///
/// Keys, key order, array order and non-string scalars are left as they
/// are. The result is pretty-printed with four-space indentation and
/// non-ASCII characters written literally.
pub async fn translate_json(content: &str, translator: &Translator) -> Result<TranslatedDocument> {
    let mut value: Value = serde_json::from_str(content)
        .map_err(|e| TradusError::MalformedInput(format!("Invalid JSON: {}", e)))?;

    let summary = translate_value(&mut value, translator).await;
    info!("JSON translation to {} finished: {}", translator.target_language(), summary);

    Ok(TranslatedDocument {
        content: to_pretty_string(&value)?,
        summary,
    })
}

/// Translate the string leaves of `value` in place, in document order
pub async fn translate_value(value: &mut Value, translator: &Translator) -> TranslationSummary {
    let mut leaves = Vec::new();
    collect_string_leaves(value, String::new(), &mut leaves);

    let mut summary = TranslationSummary::default();
    for (pointer, text) in leaves {
        let outcome = translate_unit(translator, text).await;
        if let UnitOutcome::Translated(translation) = &outcome {
            *text = translation.clone();
        }
        summary.record(pointer, &outcome);
    }

    summary
}

/// Depth-first walk gathering every string leaf with its JSON Pointer.
/// Object members are visited in insertion order.
fn collect_string_leaves<'a>(
    value: &'a mut Value,
    pointer: String,
    leaves: &mut Vec<(String, &'a mut String)>,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let child_pointer = format!("{}/{}", pointer, escape_pointer_token(key));
                collect_string_leaves(child, child_pointer, leaves);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter_mut().enumerate() {
                collect_string_leaves(child, format!("{}/{}", pointer, idx), leaves);
            }
        }
        Value::String(text) => leaves.push((pointer, text)),
        Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}

/// RFC 6901 escaping of one reference token
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn to_pretty_string(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(buf)
        .map_err(|e| TradusError::MalformedInput(format!("Serialized JSON is not UTF-8: {}", e)))
}
