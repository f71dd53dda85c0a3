//! Session configuration.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FormError;

/// Options for a [`FormSession`](crate::FormSession).
///
/// Deserializes from camelCase JSON; every key is optional:
///
/// ```
/// use form_sync::FormOptions;
///
/// let options = FormOptions::from_json(r#"{"defaultValues": {"test": [{"a": 1}]}, "trackTouched": true}"#).unwrap();
/// assert!(options.track_errors);
/// assert!(options.track_touched);
/// assert_eq!(options.first_row_id, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    /// Initial values; field arrays take their default rows from here.
    pub default_values: Map<String, Value>,
    /// Keep an error store.
    pub track_errors: bool,
    /// Keep a touched store.
    pub track_touched: bool,
    /// First token issued by the row identity allocator.
    pub first_row_id: u64,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            default_values: Map::new(),
            track_errors: true,
            track_touched: false,
            first_row_id: 1,
        }
    }
}

impl FormOptions {
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_default_values(mut self, default_values: Value) -> Self {
        if let Value::Object(map) = default_values {
            self.default_values = map;
        }
        self
    }

    pub fn with_touched(mut self, track: bool) -> Self {
        self.track_touched = track;
        self
    }

    pub fn with_errors(mut self, track: bool) -> Self {
        self.track_errors = track;
        self
    }
}
