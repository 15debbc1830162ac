//! Recovering decoder for LLM gap-fill responses.
//!
//! Parses a raw model response into an ordered batch of [`BlankItem`]s.
//! Strict JSON parsing is attempted first; on failure the repair pipeline
//! in [`repair`] runs once and the parse is retried, with a final salvage
//! attempt for arrays truncated before their closing bracket. Items that
//! fail validation are skipped with a diagnostic instead of aborting the
//! batch.

pub mod repair;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DecodeError, SkipReason};

/// Placeholder a model may embed in item text to mark a gap explicitly.
pub const GAP_MARKER: &str = "{blank}";

/// One fill-in-the-blank exercise unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankItem {
    /// Sentence or paragraph containing the answer words verbatim.
    #[serde(default)]
    pub text: String,

    /// Correct answers, in the order they appear in `text`.
    #[serde(default)]
    pub blanks: Vec<String>,

    /// Distractor strings, used only by the Inlinechoice encoding.
    #[serde(default)]
    pub wrong_substitutes: Vec<String>,
}

/// Ordered batch of decoded items. Order is preserved through rendering.
pub type ItemBatch = Vec<BlankItem>;

/// An item that was dropped during decoding, with the reason why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// Zero-based position of the item in the decoded batch.
    pub index: usize,
    /// Why the item was dropped.
    pub reason: SkipReason,
    /// Truncated JSON rendering of the offending element.
    pub preview: String,
}

/// Result of a successful decode: the valid items plus skip diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub batch: ItemBatch,
    pub skipped: Vec<SkippedItem>,
}

/// Decodes a raw model response into an [`ItemBatch`].
///
/// A top-level object is normalized to a one-element batch. Invalid
/// elements are skipped and reported in [`DecodeOutcome::skipped`];
/// only an unparseable response or a non-array/non-object top-level
/// value is a terminal error.
pub fn decode(raw: &str) -> Result<DecodeOutcome, DecodeError> {
    let value = parse_with_repair(raw)?;

    let elements = match value {
        Value::Array(elements) => elements,
        Value::Object(_) => vec![value],
        other => {
            return Err(DecodeError::UnexpectedShape {
                found: json_type_name(&other),
            })
        }
    };

    let mut batch = Vec::with_capacity(elements.len());
    let mut skipped = Vec::new();
    for (index, element) in elements.into_iter().enumerate() {
        match validate_item(index, element) {
            Ok(item) => batch.push(item),
            Err(skip) => skipped.push(skip),
        }
    }

    Ok(DecodeOutcome { batch, skipped })
}

/// Strict parse, then one repaired retry, then the truncated-array salvage.
fn parse_with_repair(raw: &str) -> Result<Value, DecodeError> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Ok(value);
    }

    let repaired = repair::repair(raw);
    let parse_err = match serde_json::from_str(&repaired) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    // Models running out of output budget drop the closing bracket of the
    // top-level array; appending it recovers every fully-emitted item.
    if repaired.starts_with('[') && !repaired.ends_with(']') {
        let closed = format!("{repaired}]");
        if let Ok(value) = serde_json::from_str(&closed) {
            return Ok(value);
        }
    }

    Err(DecodeError::Malformed {
        original: raw.to_string(),
        repaired,
        source: parse_err,
    })
}

fn validate_item(index: usize, value: Value) -> Result<BlankItem, SkippedItem> {
    let preview = preview(&value);

    if !value.is_object() {
        return Err(SkippedItem {
            index,
            reason: SkipReason::NotAnObject,
            preview,
        });
    }

    let item: BlankItem = match serde_json::from_value(value) {
        Ok(item) => item,
        Err(err) => {
            return Err(SkippedItem {
                index,
                reason: SkipReason::InvalidFields(err.to_string()),
                preview,
            })
        }
    };

    if item.blanks.is_empty() && !item.text.contains(GAP_MARKER) {
        return Err(SkippedItem {
            index,
            reason: SkipReason::NoBlanks,
            preview,
        });
    }

    Ok(item)
}

fn preview(value: &Value) -> String {
    value.to_string().chars().take(80).collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN: &str =
        r#"[{"text": "Der Hund bellt.", "blanks": ["Hund"], "wrong_substitutes": ["Katze"]}]"#;

    fn item(text: &str, blanks: &[&str], wrong: &[&str]) -> BlankItem {
        BlankItem {
            text: text.to_string(),
            blanks: blanks.iter().map(|s| s.to_string()).collect(),
            wrong_substitutes: wrong.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_strict_decode() {
        let outcome = decode(CLEAN).expect("clean JSON should decode");
        assert_eq!(
            outcome.batch,
            vec![item("Der Hund bellt.", &["Hund"], &["Katze"])]
        );
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_fenced_with_prose_equals_clean() {
        let wrapped = format!("Here you go:\n```json\n{CLEAN}\n```\nLet me know if you need more.");
        let outcome = decode(&wrapped).expect("fenced JSON should decode");
        let clean = decode(CLEAN).expect("clean JSON should decode");
        assert_eq!(outcome.batch, clean.batch);
    }

    #[test]
    fn test_trailing_comma_repaired() {
        let input = r#"[{"text": "Der Hund bellt.", "blanks": ["Hund"],},]"#;
        let outcome = decode(input).expect("trailing commas should be repaired");
        assert_eq!(outcome.batch.len(), 1);
    }

    #[test]
    fn test_truncated_array_salvaged() {
        let input = r#"[{"text": "Der Hund bellt.", "blanks": ["Hund"]}"#;
        let outcome = decode(input).expect("truncated array should be salvaged");
        assert_eq!(outcome.batch.len(), 1);
        assert_eq!(outcome.batch[0].text, "Der Hund bellt.");
    }

    #[test]
    fn test_truncated_multi_item_array_salvaged() {
        let input = r#"[{"text": "Eins a.", "blanks": ["a"]}, {"text": "Zwei b.", "blanks": ["b"]}"#;
        let outcome = decode(input).expect("truncated array should be salvaged");
        assert_eq!(outcome.batch.len(), 2);
    }

    #[test]
    fn test_single_object_wrapped_into_batch() {
        let input = r#"{"text": "Der Hund bellt.", "blanks": ["Hund"]}"#;
        let outcome = decode(input).expect("single object should decode");
        assert_eq!(outcome.batch.len(), 1);
    }

    #[test]
    fn test_unparseable_input_is_malformed() {
        let input = "I could not produce any JSON, sorry.";
        let err = decode(input).expect_err("prose should not decode");
        match err {
            DecodeError::Malformed { original, .. } => assert_eq!(original, input),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_carries_repaired_text() {
        let input = "```json\n[{\"text\": \"kapu";
        let err = decode(input).expect_err("broken JSON should not decode");
        match err {
            DecodeError::Malformed {
                original, repaired, ..
            } => {
                assert_eq!(original, input);
                assert!(!repaired.contains("```"));
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_top_level_is_unexpected_shape() {
        let err = decode("42").expect_err("a number is not a batch");
        assert!(matches!(
            err,
            DecodeError::UnexpectedShape { found: "a number" }
        ));
    }

    #[test]
    fn test_non_object_element_skipped() {
        let input = r#"[{"text": "Der Hund bellt.", "blanks": ["Hund"]}, "stray string"]"#;
        let outcome = decode(input).expect("batch with stray element should decode");
        assert_eq!(outcome.batch.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 1);
        assert_eq!(outcome.skipped[0].reason, SkipReason::NotAnObject);
    }

    #[test]
    fn test_bad_blanks_shape_skipped() {
        let input = r#"[{"text": "Der Hund bellt.", "blanks": "Hund"}]"#;
        let outcome = decode(input).expect("batch should decode");
        assert!(outcome.batch.is_empty());
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::InvalidFields(_)
        ));
    }

    #[test]
    fn test_zero_blanks_without_marker_skipped() {
        let input = r#"[{"text": "Kein Satz.", "blanks": []}]"#;
        let outcome = decode(input).expect("batch should decode");
        assert!(outcome.batch.is_empty());
        assert_eq!(outcome.skipped[0].reason, SkipReason::NoBlanks);
    }

    #[test]
    fn test_zero_blanks_with_marker_kept() {
        let input = r#"[{"text": "Der {blank} bellt.", "blanks": [], "wrong_substitutes": ["Katze"]}]"#;
        let outcome = decode(input).expect("batch should decode");
        assert_eq!(outcome.batch.len(), 1);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_skip_does_not_abort_batch() {
        let input = r#"[
            {"text": "Kein Satz.", "blanks": []},
            {"text": "Der Hund bellt.", "blanks": ["Hund"]}
        ]"#;
        let outcome = decode(input).expect("batch should decode");
        assert_eq!(outcome.batch.len(), 1);
        assert_eq!(outcome.batch[0].text, "Der Hund bellt.");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 0);
    }
}
