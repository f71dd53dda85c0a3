use std::borrow::Cow;

use serde::Deserialize;
use serde_json::Value;

use crate::constraints::Constraints;
use crate::kind::FieldKind;

/// A registered input as the validator sees it: name, kind, current raw
/// value, checked flag, and declared constraints.
///
/// Deserializes from a registration payload:
///
/// ```
/// use form_sync_validate::{Field, FieldKind};
///
/// let field: Field = serde_json::from_str(
///     r#"{"name": "age", "type": "number", "value": 3, "required": true, "min": 18}"#,
/// ).unwrap();
/// assert_eq!(field.kind, FieldKind::Number);
/// assert_eq!(field.constraints.min, Some(18.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub value: Value,
    pub checked: bool,
    #[serde(flatten)]
    pub constraints: Constraints,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: Value::String(String::new()),
            checked: false,
            constraints: Constraints::default(),
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// The raw value read as text. Numbers are stringified; other values
    /// have no text form.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match &self.value {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        }
    }

    /// The raw value read as a number. Numeric strings are parsed.
    pub fn number(&self) -> Option<f64> {
        match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns true when the raw value is the empty string or absent.
    pub fn is_blank(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}
