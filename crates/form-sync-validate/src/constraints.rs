//! Declared validation rules for one field.

use std::fmt;

use regex::Regex;
use serde::Deserialize;

use crate::PatternError;

/// A regular expression that must match the *whole* raw value.
#[derive(Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The expression as declared, without the implied anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Pattern::new(&source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

/// The constraint set declared when a field registers. Read-only afterwards.
///
/// Deserializes from the camelCase keys used by registration payloads:
/// `{"required": true, "min": 1, "max": 9, "maxLength": 20, "pattern": "[a-z]+"}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn pattern(mut self, source: &str) -> Result<Self, PatternError> {
        self.pattern = Some(Pattern::new(source)?);
        Ok(self)
    }

    /// Returns true when no rule is declared.
    pub fn is_empty(&self) -> bool {
        !self.required
            && self.min.is_none()
            && self.max.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_anchored() {
        let pattern = Pattern::new("a|ab").unwrap();
        assert!(pattern.is_full_match("ab"));
        assert!(pattern.is_full_match("a"));
        assert!(!pattern.is_full_match("abc"));
        assert!(!pattern.is_full_match("xab"));
        assert_eq!(pattern.as_str(), "a|ab");
    }

    #[test]
    fn test_pattern_invalid() {
        assert!(Pattern::new("(unclosed").is_err());
    }

    #[test]
    fn test_builder() {
        let c = Constraints::new().required().min(1.0).max(5.0).max_length(3);
        assert!(c.required);
        assert_eq!(c.min, Some(1.0));
        assert_eq!(c.max, Some(5.0));
        assert_eq!(c.max_length, Some(3));
        assert!(!c.is_empty());
        assert!(Constraints::new().is_empty());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let c: Constraints = serde_json::from_str(
            r#"{"required": true, "maxLength": 4, "pattern": "[0-9]+"}"#,
        )
        .unwrap();
        assert!(c.required);
        assert_eq!(c.max_length, Some(4));
        assert_eq!(c.pattern, Some(Pattern::new("[0-9]+").unwrap()));
        assert_eq!(c.min, None);
    }

    #[test]
    fn test_deserialize_bad_pattern_fails() {
        let result: Result<Constraints, _> = serde_json::from_str(r#"{"pattern": "("}"#);
        assert!(result.is_err());
    }
}
