use serde_json::Value;

use crate::types::Segment;

/// Get a value by path, short-circuiting to `None` at the first missing step.
///
/// Key steps made of digits index into arrays and index steps look up the
/// stringified key on objects, so `a.0` and `a[0]` read the same value.
///
/// # Example
///
/// ```
/// use form_sync_path::{get, Path};
/// use serde_json::json;
///
/// let doc = json!({"addresses": [{"city": "Oslo"}]});
/// let path: Path = "addresses[0].city".parse().unwrap();
/// assert_eq!(get(&doc, path.segments()), Some(&json!("Oslo")));
///
/// let missing: Path = "addresses[3].city".parse().unwrap();
/// assert_eq!(get(&doc, missing.segments()), None);
/// ```
pub fn get<'a>(val: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = child(current, step)?;
    }
    Some(current)
}

/// Get a mutable reference to a value by path.
///
/// Returns `None` if any step is missing; never creates containers.
pub fn get_mut<'a>(val: &'a mut Value, path: &[Segment]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = child_mut(current, step)?;
    }
    Some(current)
}

pub(crate) fn child<'a>(container: &'a Value, step: &Segment) -> Option<&'a Value> {
    match container {
        Value::Array(arr) => arr.get(step.as_index()?),
        Value::Object(map) => map.get(&*step.as_key()),
        _ => None,
    }
}

pub(crate) fn child_mut<'a>(container: &'a mut Value, step: &Segment) -> Option<&'a mut Value> {
    match container {
        Value::Array(arr) => arr.get_mut(step.as_index()?),
        Value::Object(map) => map.get_mut(&*step.as_key()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Path;
    use serde_json::json;

    fn p(s: &str) -> Path {
        s.parse().unwrap()
    }

    #[test]
    fn test_get_object_key() {
        let doc = json!({"foo": "bar"});
        assert_eq!(get(&doc, p("foo").segments()), Some(&json!("bar")));
        assert_eq!(get(&doc, p("missing").segments()), None);
    }

    #[test]
    fn test_get_root() {
        let doc = json!({"foo": 1});
        assert_eq!(get(&doc, &[]), Some(&doc));
    }

    #[test]
    fn test_get_nested_mixed() {
        let doc = json!({"a": {"b": [1, {"c": 3}]}});
        assert_eq!(get(&doc, p("a.b[1].c").segments()), Some(&json!(3)));
        assert_eq!(get(&doc, p("a.b.1.c").segments()), Some(&json!(3)));
        assert_eq!(get(&doc, p("a.b[0].c").segments()), None);
    }

    #[test]
    fn test_get_index_on_object_uses_string_key() {
        let doc = json!({"list": {"0": "zero"}});
        assert_eq!(get(&doc, p("list[0]").segments()), Some(&json!("zero")));
    }

    #[test]
    fn test_get_through_scalar_is_none() {
        let doc = json!({"a": "text"});
        assert_eq!(get(&doc, p("a.b").segments()), None);
        assert_eq!(get(&doc, p("a[0]").segments()), None);
    }

    #[test]
    fn test_get_explicit_null() {
        let doc = json!({"test": [null, {"x": 1}]});
        assert_eq!(get(&doc, p("test[0]").segments()), Some(&Value::Null));
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut doc = json!({"a": [{"b": 1}]});
        *get_mut(&mut doc, p("a[0].b").segments()).unwrap() = json!(2);
        assert_eq!(doc, json!({"a": [{"b": 2}]}));
        assert!(get_mut(&mut doc, p("a[1].b").segments()).is_none());
    }
}
