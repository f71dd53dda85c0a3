//! A form session: the value, error, and touched stores plus everything that
//! edits them.

use form_sync_path::{Path, PathStore};
use form_sync_validate::{checked_values, valid_radio_value, validate, ErrorDescriptor, Field, FieldKind};
use indexmap::map::Entry as Slot;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::FormError;
use crate::field_array::{Edit, FieldArray, Row, Stores};
use crate::identity::IdentityAllocator;
use crate::options::FormOptions;
use crate::registry::{Entry, FieldRegistry};

/// Owns the three parallel stores of one form.
///
/// The stores are only reachable read-only from outside; every write goes
/// through registration, field events, or a field-array operation.
///
/// # Example
///
/// ```
/// use form_sync::{FormOptions, FormSession};
/// use serde_json::json;
///
/// let mut form = FormSession::new(FormOptions::default());
/// let mut rows = form.field_array("items").unwrap();
/// rows.append([json!({"name": "a"})]);
/// rows.prepend([json!({"name": "b"})]);
///
/// let ids: Vec<String> = rows.rows().iter().map(|row| row.id().to_string()).collect();
/// assert_eq!(ids, vec!["2", "1"]);
/// assert_eq!(form.values(), &json!({"items": [{"name": "b"}, {"name": "a"}]}));
/// ```
#[derive(Debug, Clone)]
pub struct FormSession {
    defaults: PathStore,
    values: PathStore,
    errors: Option<PathStore>,
    touched: Option<PathStore>,
    ids: IdentityAllocator,
    registry: FieldRegistry,
    field_arrays: IndexMap<String, FieldArray>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(FormOptions::default())
    }
}

impl FormSession {
    pub fn new(options: FormOptions) -> Self {
        let defaults = PathStore::from(options.default_values);
        Self {
            values: defaults.clone(),
            defaults,
            errors: options.track_errors.then(PathStore::new),
            touched: options.track_touched.then(PathStore::new),
            ids: IdentityAllocator::starting_at(options.first_row_id),
            registry: FieldRegistry::new(),
            field_arrays: IndexMap::new(),
        }
    }

    // ── Read access ──────────────────────────────────────────────────────

    pub fn values(&self) -> &Value {
        self.values.as_value()
    }

    pub fn errors(&self) -> Option<&Value> {
        self.errors.as_ref().map(PathStore::as_value)
    }

    pub fn touched(&self) -> Option<&Value> {
        self.touched.as_ref().map(PathStore::as_value)
    }

    pub fn defaults(&self) -> &Value {
        self.defaults.as_value()
    }

    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.values.get_str(name)
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    // ── Registration ─────────────────────────────────────────────────────

    /// Register an input. A blank input adopts the value already stored at
    /// its path; checkboxes and radios derive their checked flag from it.
    ///
    /// Returns `Ok(false)` for an ignored duplicate.
    pub fn register(&mut self, mut field: Field) -> Result<bool, FormError> {
        let path = FieldRegistry::parse_name(&field.name)?;
        let current = self.values.get(&path);
        let adopt = if field.kind.is_groupable() {
            !field.checked
        } else {
            field.is_blank()
        };
        let write = current.is_none() || !adopt;
        if adopt {
            if let Some(current) = current {
                apply_value(&mut field, Some(current));
            }
        }

        let name = field.name.clone();
        let added = self.registry.insert(path, field);
        if added && write {
            self.store_value(&name);
        }
        Ok(added)
    }

    /// Register an input from its JSON description, e.g.
    /// `{"name": "age", "type": "number", "required": true, "min": 18}`.
    pub fn register_json(&mut self, payload: Value) -> Result<bool, FormError> {
        let field: Field = serde_json::from_value(payload)?;
        self.register(field)
    }

    /// Forget an input and its error and touched entries. The stored value
    /// stays.
    pub fn unregister(&mut self, name: &str) -> bool {
        let Some(entry) = self.registry.unregister(name) else {
            return false;
        };
        for store in [self.errors.as_mut(), self.touched.as_mut()].into_iter().flatten() {
            store.unset(&entry.path);
        }
        true
    }

    // ── Field events ─────────────────────────────────────────────────────

    /// The input named `name` now holds `value`. For checkboxes `value` is
    /// the checked flag, or the array of checked option values for a group;
    /// for radios it is the selected option's value.
    pub fn change(&mut self, name: &str, value: Value) -> ErrorDescriptor {
        let Some(entry) = self.registry.get_mut(name) else {
            debug!(name, "change on unregistered field");
            return ErrorDescriptor::new();
        };
        for field in &mut entry.fields {
            apply_value(field, Some(&value));
        }
        self.store_value(name);
        self.validate_field(name)
    }

    /// Check or uncheck the option of `name` whose value is `option`.
    /// Checking a radio option unchecks the rest of its group.
    pub fn set_checked(&mut self, name: &str, option: &Value, checked: bool) -> ErrorDescriptor {
        let Some(entry) = self.registry.get_mut(name) else {
            debug!(name, "change on unregistered field");
            return ErrorDescriptor::new();
        };
        for field in &mut entry.fields {
            if field.value == *option {
                field.checked = checked;
            } else if checked && field.kind == FieldKind::Radio {
                field.checked = false;
            }
        }
        self.store_value(name);
        self.validate_field(name)
    }

    /// The input lost focus: mark it touched and validate it.
    pub fn blur(&mut self, name: &str) -> ErrorDescriptor {
        let Some(entry) = self.registry.get(name) else {
            return ErrorDescriptor::new();
        };
        if let Some(touched) = self.touched.as_mut() {
            touched.set(&entry.path, Value::Bool(true));
        }
        self.validate_field(name)
    }

    /// Validate one input and merge the outcome into the error store: a
    /// non-empty descriptor is written, an empty one clears the entry.
    pub fn validate_field(&mut self, name: &str) -> ErrorDescriptor {
        let Some(entry) = self.registry.get(name) else {
            return ErrorDescriptor::new();
        };
        let Some(primary) = entry.primary() else {
            return ErrorDescriptor::new();
        };
        let found = validate(primary, &entry.fields);
        trace!(name, rules = found.len(), "field validated");
        if let Some(errors) = self.errors.as_mut() {
            if found.is_empty() {
                errors.unset(&entry.path);
            } else {
                errors.set(&entry.path, found.to_value());
            }
        }
        found
    }

    /// Validate every registered input. On success returns the collected
    /// values; otherwise the error store, which replaces the tracked one.
    pub fn handle_submit(&mut self) -> Result<Value, Value> {
        let mut values = self.values.clone();
        let mut errors = PathStore::new();
        for (_, entry) in self.registry.iter() {
            let Some(primary) = entry.primary() else {
                continue;
            };
            let found = validate(primary, &entry.fields);
            if found.is_empty() {
                values.set(&entry.path, collect_value(entry));
            } else {
                errors.set(&entry.path, found.to_value());
            }
        }
        debug!(fields = self.registry.len(), valid = errors.is_empty(), "form submitted");

        let outcome = if errors.is_empty() {
            Ok(values.into_value())
        } else {
            Err(errors.as_value().clone())
        };
        if let Some(tracked) = self.errors.as_mut() {
            *tracked = errors;
        }
        outcome
    }

    // ── Field arrays ─────────────────────────────────────────────────────

    /// Bind (on first use) and return the field array at `name`. Its
    /// default rows come from the default values at that path.
    pub fn field_array(&mut self, name: &str) -> Result<FieldArrayControl<'_>, FormError> {
        let Self {
            defaults,
            values,
            errors,
            touched,
            ids,
            registry,
            field_arrays,
        } = self;
        let array = match field_arrays.entry(name.to_string()) {
            Slot::Occupied(slot) => slot.into_mut(),
            Slot::Vacant(slot) => {
                let path = FieldRegistry::parse_name(name)?;
                let rows = defaults
                    .get(&path)
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                let array = FieldArray::new(name, rows, ids)?;
                debug!(name, rows = array.len(), "field array bound");
                slot.insert(array)
            }
        };
        Ok(FieldArrayControl {
            array,
            registry,
            values,
            stores: Stores {
                ids,
                errors: errors.as_mut(),
                touched: touched.as_mut(),
            },
        })
    }

    /// Current rows of a bound field array.
    pub fn rows(&self, name: &str) -> Option<&[Row<Value>]> {
        self.field_arrays.get(name).map(FieldArray::rows)
    }

    /// Names of the bound field arrays, each of which a form reset resets.
    pub fn field_arrays(&self) -> impl Iterator<Item = &str> + '_ {
        self.field_arrays.keys().map(String::as_str)
    }

    /// Reset one field array to its defaults. Returns false if no field
    /// array is bound at `name`.
    pub fn reset_field_array(&mut self, name: &str) -> bool {
        if !self.field_arrays.contains_key(name) {
            return false;
        }
        match self.field_array(name) {
            Ok(mut control) => {
                control.reset();
                true
            }
            Err(_) => false,
        }
    }

    /// Restore the default values, clear errors and touched state, and reset
    /// every bound field array.
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        for store in [self.errors.as_mut(), self.touched.as_mut()].into_iter().flatten() {
            store.clear();
        }

        let Self {
            values,
            errors,
            touched,
            ids,
            registry,
            field_arrays,
            ..
        } = self;
        for array in field_arrays.values_mut() {
            let mut stores = Stores {
                ids: &mut *ids,
                errors: errors.as_mut(),
                touched: touched.as_mut(),
            };
            if let Some(splice) = array.apply(&mut stores, Edit::Reset) {
                registry.reindex(array.path(), |i| splice.map_index(i));
            }
            mirror(values, array);
        }
        load_fields(registry, values, None);
        debug!(fields = registry.len(), field_arrays = field_arrays.len(), "form reset");
    }

    fn store_value(&mut self, name: &str) {
        if let Some(entry) = self.registry.get(name) {
            self.values.set(&entry.path, collect_value(entry));
        }
    }
}

/// A bound field array together with the stores it keeps aligned.
///
/// Every operation returns the rows as they stand afterwards.
#[derive(Debug)]
pub struct FieldArrayControl<'a> {
    array: &'a mut FieldArray,
    registry: &'a mut FieldRegistry,
    values: &'a mut PathStore,
    stores: Stores<'a>,
}

impl FieldArrayControl<'_> {
    pub fn name(&self) -> &str {
        self.array.name()
    }

    pub fn rows(&self) -> &[Row<Value>] {
        self.array.rows()
    }

    /// Rows as renderers consume them: payloads augmented with their `id`.
    pub fn fields(&self) -> Vec<Value> {
        self.array.rows().iter().map(Row::to_json).collect()
    }

    pub fn append(&mut self, rows: impl IntoIterator<Item = Value>) -> &[Row<Value>] {
        self.edit(Edit::Append(rows.into_iter().collect()))
    }

    pub fn prepend(&mut self, rows: impl IntoIterator<Item = Value>) -> &[Row<Value>] {
        self.edit(Edit::Prepend(rows.into_iter().collect()))
    }

    pub fn insert(&mut self, index: usize, rows: impl IntoIterator<Item = Value>) -> &[Row<Value>] {
        self.edit(Edit::Insert(index, rows.into_iter().collect()))
    }

    /// Remove the row at `index`, or every row when `None`.
    pub fn remove(&mut self, index: Option<usize>) -> &[Row<Value>] {
        self.edit(Edit::Remove(index))
    }

    pub fn swap(&mut self, a: usize, b: usize) -> &[Row<Value>] {
        self.edit(Edit::Swap(a, b))
    }

    pub fn move_row(&mut self, from: usize, to: usize) -> &[Row<Value>] {
        self.edit(Edit::Move(from, to))
    }

    pub fn reset(&mut self) -> &[Row<Value>] {
        self.edit(Edit::Reset)
    }

    fn edit(&mut self, edit: Edit<Value>) -> &[Row<Value>] {
        self.refresh();
        let resets = matches!(edit, Edit::Reset);
        if let Some(splice) = self.array.apply(&mut self.stores, edit) {
            self.registry.reindex(self.array.path(), |i| splice.map_index(i));
            mirror(self.values, self.array);
            if resets {
                load_fields(self.registry, self.values, Some(self.array.path()));
            }
        }
        self.array.rows()
    }

    /// Pull edits made through registered inputs back into the row payloads.
    fn refresh(&mut self) {
        let Some(Value::Array(current)) = self.values.get(self.array.path()) else {
            return;
        };
        for (row, value) in self.array.rows_mut().iter_mut().zip(current) {
            if !value.is_null() {
                row.value.clone_from(value);
            }
        }
    }
}

fn mirror(values: &mut PathStore, array: &FieldArray) {
    values.set(array.path(), Value::Array(array.values().cloned().collect()));
}

/// Load the stored value into every registered input under `prefix`.
fn load_fields(registry: &mut FieldRegistry, values: &PathStore, prefix: Option<&Path>) {
    for (_, entry) in registry.iter_mut() {
        if prefix.is_some_and(|prefix| !entry.path.starts_with(prefix)) {
            continue;
        }
        let current = values.get(&entry.path);
        for field in &mut entry.fields {
            apply_value(field, current);
        }
    }
}

/// Set an input's raw state from a stored value. `None` clears it.
fn apply_value(field: &mut Field, value: Option<&Value>) {
    match field.kind {
        FieldKind::Checkbox => {
            field.checked = match value {
                Some(Value::Bool(checked)) => *checked,
                Some(Value::Array(items)) => items.contains(&field.value),
                Some(other) => !other.is_null() && *other == field.value,
                None => false,
            }
        }
        FieldKind::Radio => field.checked = value.is_some_and(|v| *v == field.value),
        _ => {
            field.value = value
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()))
        }
    }
}

/// The value an input group contributes to the value store.
fn collect_value(entry: &Entry) -> Value {
    let Some(primary) = entry.primary() else {
        return Value::Null;
    };
    match primary.kind {
        FieldKind::Checkbox if entry.fields.len() > 1 => {
            Value::Array(checked_values(&primary.name, &entry.fields))
        }
        FieldKind::Checkbox => Value::Bool(primary.checked),
        FieldKind::Radio => valid_radio_value(&primary.name, &entry.fields).value,
        _ => primary.value.clone(),
    }
}
