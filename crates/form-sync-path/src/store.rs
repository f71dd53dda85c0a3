//! Path-addressable nested store.
//!
//! Writes create missing intermediate containers; deletes prune every
//! ancestor container that the deletion leaves empty, stopping at the first
//! non-empty one. The store root itself is never removed.

use std::mem;

use serde_json::{Map, Value};

use crate::get::{child_mut, get, get_mut};
use crate::types::{Path, Segment};
use crate::validate::MAX_INDEX;

/// Check if a value is an "empty" container for pruning purposes.
///
/// - Object: no own keys.
/// - Array: every element is `null` (an absent slot) or an empty object.
/// - Anything else is not a container and never empty.
///
/// # Example
///
/// ```
/// use form_sync_path::is_empty_container;
/// use serde_json::json;
///
/// assert!(is_empty_container(&json!({})));
/// assert!(is_empty_container(&json!([null, {}])));
/// assert!(!is_empty_container(&json!([null, {"required": true}])));
/// assert!(!is_empty_container(&json!("")));
/// ```
pub fn is_empty_container(val: &Value) -> bool {
    match val {
        Value::Object(map) => map.is_empty(),
        Value::Array(arr) => arr
            .iter()
            .all(|item| item.is_null() || item.as_object().is_some_and(Map::is_empty)),
        _ => false,
    }
}

/// Write `value` at `path`, creating intermediate containers as needed.
///
/// A missing step becomes an array when the step after it addresses an array
/// position (`[0]` or a digit key such as `.0`), an object otherwise. Scalars met on the way are replaced. Returns the
/// previous non-null value at `path`.
///
/// # Example
///
/// ```
/// use form_sync_path::{set, Path};
/// use serde_json::json;
///
/// let mut doc = json!({});
/// let path: Path = "a.b[1].c".parse().unwrap();
/// set(&mut doc, path.segments(), json!(1));
/// assert_eq!(doc, json!({"a": {"b": [null, {"c": 1}]}}));
/// ```
pub fn set(root: &mut Value, path: &[Segment], value: Value) -> Option<Value> {
    let Some((last, parents)) = path.split_last() else {
        return non_null(mem::replace(root, value));
    };

    let mut current = root;
    for (i, step) in parents.iter().enumerate() {
        let next_is_index = path[i + 1].as_index().is_some();
        let slot = slot_mut(current, step)?;
        if !slot.is_object() && !slot.is_array() {
            *slot = empty_container(next_is_index);
        }
        current = slot;
    }

    let slot = slot_mut(current, last)?;
    non_null(mem::replace(slot, value))
}

/// Delete the value at `path` and prune emptied ancestors.
///
/// Object keys are removed; array elements are replaced by a `null` hole so
/// sibling positions stay stable. Returns the removed value, if any.
///
/// # Example
///
/// ```
/// use form_sync_path::{unset, Path};
/// use serde_json::json;
///
/// let mut doc = json!({"a": {"b": {"c": 1}}, "d": 2});
/// let path: Path = "a.b.c".parse().unwrap();
/// unset(&mut doc, path.segments());
/// assert_eq!(doc, json!({"d": 2}));
/// ```
pub fn unset(root: &mut Value, path: &[Segment]) -> Option<Value> {
    let (step, rest) = path.split_first()?;
    if rest.is_empty() {
        return remove_slot(root, step);
    }
    let child = child_mut(root, step)?;
    let removed = unset(child, rest);
    if is_empty_container(child) {
        remove_slot(root, step);
    }
    removed
}

/// Reshape `container` so it can hold `step`, then return the slot.
fn slot_mut<'a>(container: &'a mut Value, step: &Segment) -> Option<&'a mut Value> {
    let replacement = match container {
        Value::Object(_) => None,
        Value::Array(_) if step.as_index().is_some() => None,
        Value::Array(items) => Some(Value::Object(
            mem::take(items)
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect(),
        )),
        _ => Some(empty_container(step.as_index().is_some())),
    };
    if let Some(replacement) = replacement {
        *container = replacement;
    }

    match container {
        Value::Array(items) => {
            let idx = step.as_index().filter(|idx| *idx <= MAX_INDEX)?;
            if items.len() <= idx {
                items.resize(idx + 1, Value::Null);
            }
            items.get_mut(idx)
        }
        Value::Object(map) => Some(map.entry(step.as_key().into_owned()).or_insert(Value::Null)),
        _ => None,
    }
}

fn remove_slot(container: &mut Value, step: &Segment) -> Option<Value> {
    match container {
        Value::Object(map) => map.remove(&*step.as_key()),
        Value::Array(items) => {
            let slot = items.get_mut(step.as_index()?)?;
            non_null(mem::replace(slot, Value::Null))
        }
        _ => None,
    }
}

fn empty_container(array: bool) -> Value {
    if array {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn non_null(val: Value) -> Option<Value> {
    if val.is_null() {
        None
    } else {
        Some(val)
    }
}

/// A root object addressed by [`Path`]s.
///
/// Used for the value, error, and touched stores of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStore {
    root: Value,
}

impl Default for PathStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PathStore {
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Returns true when the root holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.as_object().map_or(true, Map::is_empty)
    }

    pub fn clear(&mut self) {
        self.root = Value::Object(Map::new());
    }

    pub fn get(&self, path: &Path) -> Option<&Value> {
        get(&self.root, path.segments())
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Value> {
        get_mut(&mut self.root, path.segments())
    }

    /// Read by path string. Unparseable paths read as absent.
    pub fn get_str(&self, path: &str) -> Option<&Value> {
        let path: Path = path.parse().ok()?;
        get(&self.root, path.segments())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    /// Write at `path`. Writing the empty path is ignored: the root stays an object.
    pub fn set(&mut self, path: &Path, value: Value) -> Option<Value> {
        if path.is_empty() {
            return None;
        }
        set(&mut self.root, path.segments(), value)
    }

    pub fn unset(&mut self, path: &Path) -> Option<Value> {
        unset(&mut self.root, path.segments())
    }
}

impl From<Map<String, Value>> for PathStore {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            root: Value::Object(map),
        }
    }
}
