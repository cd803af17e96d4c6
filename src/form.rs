//! Form input primitives
//!
//! Raw form values arrive as optional strings. These helpers classify and
//! coerce them, and collect per-field error messages.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field-indexed validation messages
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field unless it already has one
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Classification of a single raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput<'a> {
    /// Field not submitted at all
    Absent,
    /// Field submitted but blank
    Empty,
    /// Trimmed, non-empty text
    Value(&'a str),
}

impl<'a> RawInput<'a> {
    pub fn of(value: &'a Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            None => RawInput::Absent,
            Some("") => RawInput::Empty,
            Some(text) => RawInput::Value(text),
        }
    }
}

/// Parse a finite number from text
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Blank or absent text becomes `None`
pub fn optional_text(value: &Option<String>) -> Option<String> {
    match RawInput::of(value) {
        RawInput::Value(text) => Some(text.to_string()),
        _ => None,
    }
}

/// Accept strings, numbers or booleans for a form field
///
/// JSON submissions carry typed values while HTML forms carry strings; both
/// end up as text so the validators see one shape.
pub fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_input_classification() {
        assert_eq!(RawInput::of(&None), RawInput::Absent);
        assert_eq!(RawInput::of(&Some("   ".to_string())), RawInput::Empty);
        assert_eq!(RawInput::of(&Some(" 12 ".to_string())), RawInput::Value("12"));
    }

    #[test]
    fn test_parse_number_rejects_non_finite() {
        assert_eq!(parse_number("24.7"), Some(24.7));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert("latitude", "first");
        errors.insert("latitude", "second");
        assert_eq!(errors.get("latitude"), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::new();
        errors.insert("budgetMax", "Budget min must be less than max");
        assert_eq!(errors.to_string(), "budgetMax: Budget min must be less than max");
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_string")]
        value: Option<String>,
    }

    #[test]
    fn test_lenient_string_accepts_numbers() {
        let sample: Sample = serde_json::from_str(r#"{"value": 24.7}"#).unwrap();
        assert_eq!(sample.value.as_deref(), Some("24.7"));

        let sample: Sample = serde_json::from_str(r#"{"value": "46.7"}"#).unwrap();
        assert_eq!(sample.value.as_deref(), Some("46.7"));

        let sample: Sample = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert!(sample.value.is_none());

        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert!(sample.value.is_none());
    }
}
