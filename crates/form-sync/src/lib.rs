//! Client-side form state: values, validation errors, and touched flags kept
//! in three parallel path-addressed stores.
//!
//! The centerpiece is the field array, an ordered list of identity-tagged
//! rows. Every structural operation on it (append, prepend, insert, remove,
//! swap, move, reset) is replayed on the row's error and touched entries so
//! the three stores stay index-aligned.
//!
//! ```
//! use form_sync::{Constraints, Field, FieldKind, FormOptions, FormSession};
//! use serde_json::json;
//!
//! let options = FormOptions::default()
//!     .with_default_values(json!({"guests": [{"name": "Ada"}, {"name": ""}]}));
//! let mut form = FormSession::new(options);
//! form.field_array("guests").unwrap();
//!
//! for i in 0..2 {
//!     let name = format!("guests[{i}].name");
//!     form.register(Field::new(name, FieldKind::Text).with_constraints(Constraints::new().required()))
//!         .unwrap();
//! }
//! assert_eq!(form.handle_submit().unwrap_err(), json!({"guests": [null, {"name": {"required": true}}]}));
//!
//! // Moving the invalid row moves its error with it.
//! form.field_array("guests").unwrap().swap(0, 1);
//! assert_eq!(form.errors(), Some(&json!({"guests": [{"name": {"required": true}}, null]})));
//! ```

pub mod error;
pub mod field_array;
pub mod identity;
pub mod options;
pub mod registry;
pub mod session;
pub mod splice;

pub use error::FormError;
pub use field_array::{Edit, FieldArray, Row, Stores};
pub use identity::{IdentityAllocator, RowId};
pub use options::FormOptions;
pub use registry::{Entry, FieldRegistry};
pub use session::{FieldArrayControl, FormSession};
pub use splice::Splice;

pub use form_sync_path::{Path, PathError, PathStore};
pub use form_sync_validate::{Constraints, ErrorDescriptor, Field, FieldKind, Rule};
