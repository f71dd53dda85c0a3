//! Form paths and the path-addressable nested store.
//!
//! A path addresses a location in nested JSON using `.` for object descent
//! and `[i]` for array indexing (`addresses[1].city`). Paths are parsed once
//! into [`Segment`]s; the store functions work on the parsed form.
//!
//! # Example
//!
//! ```
//! use form_sync_path::{Path, PathStore};
//! use serde_json::json;
//!
//! let mut store = PathStore::new();
//! let city: Path = "addresses[1].city".parse().unwrap();
//!
//! store.set(&city, json!("Bergen"));
//! assert_eq!(store.get(&city), Some(&json!("Bergen")));
//!
//! // Deleting the only leaf prunes the emptied row and the array.
//! store.unset(&city);
//! assert_eq!(store.as_value(), &json!({}));
//! ```

use thiserror::Error;

mod get;
pub mod store;
pub mod types;
pub mod util;
pub mod validate;

pub use get::{get, get_mut};
pub use store::{is_empty_container, set, unset, PathStore};
pub use types::{Path, Segment};
pub use util::{format_path, is_integer, is_valid_index, parse_path};
pub use validate::{validate_path, validate_path_str, MAX_INDEX};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("EMPTY_PATH")]
    EmptyPath,
    #[error("EMPTY_SEGMENT")]
    EmptySegment,
    #[error("UNCLOSED_BRACKET")]
    UnclosedBracket,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("UNEXPECTED_CHAR: {0}")]
    UnexpectedChar(char),
    #[error("PATH_TOO_LONG")]
    PathTooLong,
}
