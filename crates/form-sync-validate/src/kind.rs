//! Input kinds.

use serde::Deserialize;

/// Input types read as free text.
pub const STRING_INPUTS: [&str; 7] = [
    "text", "email", "password", "search", "tel", "url", "textarea",
];

/// Date and time input types.
pub const DATE_INPUTS: [&str; 6] = ["date", "time", "month", "datetime", "datetime-local", "week"];

/// The kind of input a field is bound to. Decides which rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum FieldKind {
    Checkbox,
    Radio,
    SelectOne,
    Textarea,
    Number,
    /// Generic text-like input (text, email, password, file, date, ...).
    #[default]
    Text,
}

impl FieldKind {
    /// Map an HTML input `type` attribute to a kind.
    ///
    /// Anything not listed explicitly is text-like.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type {
            "checkbox" => FieldKind::Checkbox,
            "radio" => FieldKind::Radio,
            "select-one" => FieldKind::SelectOne,
            "textarea" => FieldKind::Textarea,
            "number" => FieldKind::Number,
            _ => FieldKind::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::SelectOne => "select-one",
            FieldKind::Textarea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Text => "text",
        }
    }

    /// Checkbox and radio inputs sharing a name form one group.
    pub fn is_groupable(&self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio)
    }

    /// Returns true for inputs whose raw value is free text.
    pub fn is_string_input(input_type: &str) -> bool {
        STRING_INPUTS.contains(&input_type)
    }

    pub fn is_date_input(input_type: &str) -> bool {
        DATE_INPUTS.contains(&input_type)
    }
}

impl From<&str> for FieldKind {
    fn from(input_type: &str) -> Self {
        FieldKind::from_input_type(input_type)
    }
}

impl From<String> for FieldKind {
    fn from(input_type: String) -> Self {
        FieldKind::from_input_type(&input_type)
    }
}
