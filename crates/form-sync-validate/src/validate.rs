//! Rule evaluation.
//!
//! Every rule is an independent check; any subset may fire. The result is
//! a pure function of the field and its group siblings.

use serde_json::Value;

use crate::descriptor::{ErrorDescriptor, Rule};
use crate::field::Field;
use crate::kind::FieldKind;

/// The checked option of a radio group.
#[derive(Debug, Clone, PartialEq)]
pub struct RadioValue {
    pub is_valid: bool,
    pub value: Value,
}

/// Find the checked option among the radios named `name`.
///
/// An option counts only when it is checked and carries a non-empty value.
pub fn valid_radio_value(name: &str, siblings: &[Field]) -> RadioValue {
    siblings
        .iter()
        .find(|f| f.kind == FieldKind::Radio && f.name == name && f.checked && !f.is_blank())
        .map(|f| RadioValue {
            is_valid: true,
            value: f.value.clone(),
        })
        .unwrap_or(RadioValue {
            is_valid: false,
            value: Value::Null,
        })
}

/// Values of every checked checkbox named `name`, in registration order.
pub fn checked_values(name: &str, siblings: &[Field]) -> Vec<Value> {
    siblings
        .iter()
        .filter(|f| f.kind == FieldKind::Checkbox && f.name == name && f.checked)
        .map(|f| f.value.clone())
        .collect()
}

/// Validate one field against its declared constraints.
///
/// `siblings` holds the fields sharing this field's group name (the field
/// itself may be among them); radio and checkbox `required` consult it.
///
/// # Example
///
/// ```
/// use form_sync_validate::{validate, Constraints, Field, FieldKind, Rule};
///
/// let field = Field::new("age", FieldKind::Number)
///     .with_value(0)
///     .with_constraints(Constraints::new().required());
///
/// // A numeric zero counts as "not filled in".
/// assert!(validate(&field, &[]).contains(Rule::Required));
/// ```
pub fn validate(field: &Field, siblings: &[Field]) -> ErrorDescriptor {
    let constraints = &field.constraints;
    let mut errors = ErrorDescriptor::new();

    if constraints.required && is_missing(field, siblings) {
        errors.insert(Rule::Required);
    }

    if field.kind == FieldKind::Number {
        if let Some(number) = field.number() {
            if constraints.max.is_some_and(|max| number > max) {
                errors.insert(Rule::Max);
            }
            if constraints.min.is_some_and(|min| number < min) {
                errors.insert(Rule::Min);
            }
        }
    }

    if field.kind == FieldKind::Text {
        if let Some(text) = field.text() {
            if constraints
                .max_length
                .is_some_and(|max_length| text.chars().count() > max_length)
            {
                errors.insert(Rule::MaxLength);
            }
            if constraints
                .pattern
                .as_ref()
                .is_some_and(|pattern| !pattern.is_full_match(&text))
            {
                errors.insert(Rule::Pattern);
            }
        }
    }

    errors
}

fn is_missing(field: &Field, siblings: &[Field]) -> bool {
    match field.kind {
        FieldKind::Checkbox => {
            !field.checked && checked_values(&field.name, siblings).is_empty()
        }
        FieldKind::Radio => !valid_radio_value(&field.name, siblings).is_valid,
        FieldKind::Number => field.is_blank() || field.value.as_f64() == Some(0.0),
        FieldKind::SelectOne | FieldKind::Textarea | FieldKind::Text => field.is_blank(),
    }
}
