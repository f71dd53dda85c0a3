//! Registered inputs, grouped by name.

use form_sync_path::{Path, Segment};
use form_sync_validate::Field;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::FormError;

/// Fields sharing one name: a single input, or a radio/checkbox group.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: Path,
    pub fields: Vec<Field>,
}

impl Entry {
    /// The field whose constraints govern the group.
    pub fn primary(&self) -> Option<&Field> {
        self.fields.first()
    }
}

/// Registered fields keyed by name, in registration order.
///
/// A field renamed by a field-array edit keeps its slot, so after a swap the
/// field registered first still comes first under its new name.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    entries: IndexMap<String, Entry>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a field name and parse it into a path.
    pub fn parse_name(name: &str) -> Result<Path, FormError> {
        if name.is_empty() {
            warn!("missing the name for field");
            return Err(FormError::MissingName);
        }
        name.parse().map_err(|err| {
            warn!(name, %err, "invalid field name");
            FormError::InvalidPath(err)
        })
    }

    /// Register `field`. Returns `Ok(false)` when it duplicates a field
    /// already registered under the same name.
    pub fn register(&mut self, field: Field) -> Result<bool, FormError> {
        let path = Self::parse_name(&field.name)?;
        Ok(self.insert(path, field))
    }

    /// Register an already-parsed field. A second field under a known name
    /// joins the group only when both are radios or both are checkboxes and
    /// its value is new to the group.
    pub fn insert(&mut self, path: Path, field: Field) -> bool {
        match self.entries.get_mut(&field.name) {
            Some(entry) => {
                let joins = field.kind.is_groupable()
                    && entry.fields.iter().all(|f| f.kind == field.kind && f.value != field.value);
                if joins {
                    debug!(name = %field.name, value = %field.value, "field joined group");
                    entry.fields.push(field);
                } else {
                    debug!(name = %field.name, "duplicate registration ignored");
                }
                joins
            }
            None => {
                debug!(name = %field.name, kind = field.kind.as_str(), "field registered");
                self.entries.insert(
                    field.name.clone(),
                    Entry {
                        path,
                        fields: vec![field],
                    },
                );
                true
            }
        }
    }

    pub fn unregister(&mut self, name: &str) -> Option<Entry> {
        let entry = self.entries.shift_remove(name);
        if entry.is_some() {
            debug!(name, "field unregistered");
        }
        entry
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> + '_ {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Entry)> + '_ {
        self.entries.iter_mut().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Follow a field-array edit: fields under `prefix[i]` move to
    /// `prefix[map(i)]`, and are dropped where `map` returns `None`.
    ///
    /// `map` must be injective. Entries are rebuilt in their current order,
    /// so a renamed field stays at its position.
    pub fn reindex(&mut self, prefix: &Path, map: impl Fn(usize) -> Option<usize>) {
        let depth = prefix.len();
        let entries = std::mem::take(&mut self.entries);
        self.entries.reserve(entries.len());
        for (name, mut entry) in entries {
            let old = match entry.path.segments().get(depth) {
                Some(segment) if entry.path.starts_with(prefix) => segment.as_index(),
                _ => None,
            };
            let Some(old) = old else {
                self.entries.insert(name, entry);
                continue;
            };
            match map(old) {
                Some(new) if new == old => {
                    self.entries.insert(name, entry);
                }
                Some(new) => {
                    let mut segments = entry.path.segments().to_vec();
                    segments[depth] = Segment::Index(new);
                    entry.path = Path::new(segments);
                    let renamed = entry.path.to_string();
                    for field in &mut entry.fields {
                        field.name.clone_from(&renamed);
                    }
                    debug!(from = %name, to = %renamed, "field reindexed");
                    if let Some(shadowed) = self.entries.insert(renamed, entry) {
                        warn!(name = %shadowed.path, "two fields reindexed onto one name");
                    }
                }
                None => debug!(name = %name, "field dropped with its row"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_sync_validate::FieldKind;

    #[test]
    fn test_missing_name() {
        let mut registry = FieldRegistry::new();
        let err = registry.register(Field::new("", FieldKind::Text)).unwrap_err();
        assert!(matches!(err, FormError::MissingName));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_name() {
        let mut registry = FieldRegistry::new();
        let err = registry.register(Field::new("a[", FieldKind::Text)).unwrap_err();
        assert!(matches!(err, FormError::InvalidPath(_)));
    }

    #[test]
    fn test_duplicates_ignored() {
        let mut registry = FieldRegistry::new();
        assert!(registry.register(Field::new("a", FieldKind::Text)).unwrap());
        assert!(!registry.register(Field::new("a", FieldKind::Text)).unwrap());
        assert_eq!(registry.get("a").unwrap().fields.len(), 1);
    }

    #[test]
    fn test_radio_group_accumulates_distinct_values() {
        let mut registry = FieldRegistry::new();
        for value in ["s", "m", "m"] {
            registry
                .register(Field::new("size", FieldKind::Radio).with_value(value))
                .unwrap();
        }
        let entry = registry.get("size").unwrap();
        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.primary().unwrap().value, "s");

        // A different kind under the same name does not join.
        assert!(!registry
            .register(Field::new("size", FieldKind::Checkbox).with_value("l"))
            .unwrap());
    }

    #[test]
    fn test_unregister_keeps_order() {
        let mut registry = FieldRegistry::new();
        for name in ["a", "b", "c"] {
            registry.register(Field::new(name, FieldKind::Text)).unwrap();
        }
        assert!(registry.unregister("b").is_some());
        assert!(registry.unregister("b").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_reindex_follows_rows() {
        let mut registry = FieldRegistry::new();
        for name in ["test[0].name", "test[1].name", "test[2].name", "title"] {
            registry.register(Field::new(name, FieldKind::Text)).unwrap();
        }
        let prefix: Path = "test".parse().unwrap();
        // Remove row 1.
        registry.reindex(&prefix, |i| match i {
            1 => None,
            i if i > 1 => Some(i - 1),
            i => Some(i),
        });
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["test[0].name", "test[1].name", "title"]);
        assert!(!registry.contains("test[2].name"));
        assert_eq!(registry.get("test[1].name").unwrap().fields[0].name, "test[1].name");
    }

    #[test]
    fn test_reindex_keeps_positions() {
        let mut registry = FieldRegistry::new();
        for name in ["title", "test[0].name", "test[1].name", "test[2].name", "notes"] {
            registry.register(Field::new(name, FieldKind::Text)).unwrap();
        }
        let prefix: Path = "test".parse().unwrap();
        // Swap rows 0 and 2.
        registry.reindex(&prefix, |i| match i {
            0 => Some(2),
            2 => Some(0),
            i => Some(i),
        });
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec!["title", "test[2].name", "test[1].name", "test[0].name", "notes"]
        );
        let fields: Vec<_> = registry.iter().map(|(_, entry)| entry.fields[0].name.as_str()).collect();
        assert_eq!(fields, names);
    }

    #[test]
    fn test_reindex_canonicalizes_dotted_names() {
        let mut registry = FieldRegistry::new();
        registry.register(Field::new("test.0.name", FieldKind::Text)).unwrap();
        registry.register(Field::new("test.1.name", FieldKind::Text)).unwrap();
        let prefix: Path = "test".parse().unwrap();
        // Move row 1 to the front.
        registry.reindex(&prefix, |i| Some(1 - i));
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["test[1].name", "test[0].name"]);
    }
}
