//! Field normalization: canonicalizes heterogeneous profile/job attributes
//! into uniform token sets.
//!
//! Résumé-derived columns are ambiguous by construction: the same text column
//! may hold a plain string ("Python, SQL"), a JSON-encoded array
//! (`["Python","SQL"]`), or a JSON object dumped by the résumé parser. The
//! shape is resolved once, at this boundary, into a `FieldValue`; business
//! logic never type-sniffs raw column text.

use std::collections::BTreeSet;

/// Tagged representation of a raw profile field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Plain (possibly comma-delimited) text.
    Scalar(String),
    /// JSON array of items.
    TokenList(Vec<String>),
    /// JSON document that is not an array (e.g. the structured education
    /// object). Tokenized from the raw text, not from the document.
    Structured(serde_json::Value),
}

impl FieldValue {
    /// Classifies a raw column value. Never fails: unparseable JSON is simply
    /// a scalar.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(items)) => FieldValue::TokenList(
                items.iter().map(json_item_to_string).collect(),
            ),
            Ok(value) if value.is_object() => FieldValue::Structured(value),
            _ => FieldValue::Scalar(raw.to_string()),
        }
    }
}

/// Normalizes a nullable field value into a set of lowercase, trimmed,
/// non-empty tokens.
///
/// JSON arrays contribute one token per element; anything else falls back to
/// comma splitting of the raw text. Pure and total: a decode failure is an
/// expected case, not an error.
pub fn normalize_tokens(raw: Option<&str>) -> BTreeSet<String> {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => return BTreeSet::new(),
    };

    let items: Vec<String> = match FieldValue::parse(raw) {
        FieldValue::TokenList(items) => items,
        // Non-array JSON and plain text both take the comma-split path.
        FieldValue::Scalar(_) | FieldValue::Structured(_) => {
            raw.split(',').map(str::to_string).collect()
        }
    };

    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercased single scalar, `None` if absent or blank. Used for the
/// preference fields (position, city, format, work time, level).
pub fn normalize_scalar(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty())
}

fn json_item_to_string(item: &serde_json::Value) -> String {
    match item {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
