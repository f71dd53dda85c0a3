//! Declarative per-field validation.
//!
//! Fields declare a [`Constraints`] set at registration; [`validate`] turns a
//! field's current raw value into an [`ErrorDescriptor`] naming the rules it
//! violates. Validation failures are normal output, not errors.
//!
//! # Example
//!
//! ```
//! use form_sync_validate::{validate, Constraints, Field, FieldKind};
//! use serde_json::json;
//!
//! let field = Field::new("zip", FieldKind::Text)
//!     .with_value("12a45")
//!     .with_constraints(Constraints::new().required().max_length(4).pattern("[0-9]+").unwrap());
//!
//! let errors = validate(&field, &[]);
//! assert_eq!(errors.to_value(), json!({"maxLength": true, "pattern": true}));
//! ```

use thiserror::Error;

pub mod constraints;
pub mod descriptor;
pub mod field;
pub mod kind;
pub mod validate;

pub use constraints::{Constraints, Pattern};
pub use descriptor::{ErrorDescriptor, Rule};
pub use field::Field;
pub use kind::{FieldKind, DATE_INPUTS, STRING_INPUTS};
pub use validate::{checked_values, valid_radio_value, validate, RadioValue};

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("INVALID_PATTERN: {0}")]
    InvalidPattern(#[from] regex::Error),
}
