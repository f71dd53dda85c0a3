//! Field arrays: ordered, identity-tagged rows kept index-aligned with their
//! error and touched sequences.
//!
//! Every structural operation is computed as one [`Splice`] and replayed on
//! the rows and on the parallel sequences, so after any operation the row at
//! index `i`, its error entry, and its touched entry still describe the same
//! logical row.

use form_sync_path::{is_empty_container, Path, PathError, PathStore};
use serde_json::{Map, Value};
use tracing::debug;

use crate::identity::{IdentityAllocator, RowId};
use crate::splice::Splice;

/// A payload paired with its stable identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    id: RowId,
    pub value: T,
}

impl<T> Row<T> {
    pub fn new(id: RowId, value: T) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }
}

impl Row<Value> {
    /// The row as a renderer sees it: the payload object with its `id`.
    /// Non-object payloads are wrapped as `{"id": .., "value": ..}`.
    pub fn to_json(&self) -> Value {
        let id = Value::String(self.id.to_string());
        match &self.value {
            Value::Object(fields) => {
                let mut out = fields.clone();
                out.insert("id".to_string(), id);
                Value::Object(out)
            }
            other => {
                let mut out = Map::new();
                out.insert("id".to_string(), id);
                out.insert("value".to_string(), other.clone());
                Value::Object(out)
            }
        }
    }
}

/// A structural operation on a field array.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit<T> {
    Append(Vec<T>),
    Prepend(Vec<T>),
    Insert(usize, Vec<T>),
    /// Remove one row, or every row when `None`.
    Remove(Option<usize>),
    Swap(usize, usize),
    Move(usize, usize),
    /// Restore the default rows with fresh identities.
    Reset,
}

impl<T> Edit<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Edit::Append(_) => "append",
            Edit::Prepend(_) => "prepend",
            Edit::Insert(..) => "insert",
            Edit::Remove(_) => "remove",
            Edit::Swap(..) => "swap",
            Edit::Move(..) => "move",
            Edit::Reset => "reset",
        }
    }
}

/// The stores a field array keeps aligned with its rows.
///
/// Absent error or touched stores are simply not synchronized.
#[derive(Debug)]
pub struct Stores<'a> {
    pub ids: &'a mut IdentityAllocator,
    pub errors: Option<&'a mut PathStore>,
    pub touched: Option<&'a mut PathStore>,
}

/// One repeating group of rows bound to a path in the form.
#[derive(Debug, Clone)]
pub struct FieldArray<T = Value> {
    name: String,
    path: Path,
    rows: Vec<Row<T>>,
    defaults: Vec<T>,
}

impl<T: Clone> FieldArray<T> {
    /// Bind a field array to `name`, tagging each default row with a fresh
    /// identity.
    pub fn new(name: &str, defaults: Vec<T>, ids: &mut IdentityAllocator) -> Result<Self, PathError> {
        let path: Path = name.parse()?;
        let rows = defaults
            .iter()
            .cloned()
            .map(|value| Row::new(ids.allocate(), value))
            .collect();
        Ok(Self {
            name: name.to_string(),
            path,
            rows,
            defaults,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    /// Mutable access to row payloads. Length and identities stay fixed.
    pub fn rows_mut(&mut self) -> &mut [Row<T>] {
        &mut self.rows
    }

    pub fn defaults(&self) -> &[T] {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RowId> + '_ {
        self.rows.iter().map(Row::id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.iter().map(|row| &row.value)
    }

    // ── Structural operations ────────────────────────────────────────────

    pub fn append(&mut self, stores: &mut Stores<'_>, rows: impl IntoIterator<Item = T>) -> &[Row<T>] {
        self.apply(stores, Edit::Append(rows.into_iter().collect()));
        &self.rows
    }

    pub fn prepend(&mut self, stores: &mut Stores<'_>, rows: impl IntoIterator<Item = T>) -> &[Row<T>] {
        self.apply(stores, Edit::Prepend(rows.into_iter().collect()));
        &self.rows
    }

    /// Insert at `index`; an index past the end appends.
    pub fn insert(
        &mut self,
        stores: &mut Stores<'_>,
        index: usize,
        rows: impl IntoIterator<Item = T>,
    ) -> &[Row<T>] {
        self.apply(stores, Edit::Insert(index, rows.into_iter().collect()));
        &self.rows
    }

    pub fn remove(&mut self, stores: &mut Stores<'_>, index: Option<usize>) -> &[Row<T>] {
        self.apply(stores, Edit::Remove(index));
        &self.rows
    }

    pub fn swap(&mut self, stores: &mut Stores<'_>, a: usize, b: usize) -> &[Row<T>] {
        self.apply(stores, Edit::Swap(a, b));
        &self.rows
    }

    pub fn move_row(&mut self, stores: &mut Stores<'_>, from: usize, to: usize) -> &[Row<T>] {
        self.apply(stores, Edit::Move(from, to));
        &self.rows
    }

    pub fn reset(&mut self, stores: &mut Stores<'_>) -> &[Row<T>] {
        self.apply(stores, Edit::Reset);
        &self.rows
    }

    /// Run one structural operation over the rows and the parallel stores.
    ///
    /// Returns the splice that was applied, or `None` when the operation
    /// degraded to a no-op.
    pub fn apply(&mut self, stores: &mut Stores<'_>, edit: Edit<T>) -> Option<Splice> {
        let op = edit.name();
        let len = self.rows.len();
        let (splice, new_rows) = match edit {
            Edit::Append(rows) => (Splice::Insert { index: len, count: rows.len() }, rows),
            Edit::Prepend(rows) => (Splice::Insert { index: 0, count: rows.len() }, rows),
            Edit::Insert(index, rows) => (
                Splice::Insert {
                    index: index.min(len),
                    count: rows.len(),
                },
                rows,
            ),
            Edit::Remove(Some(index)) if index >= len => {
                // Nothing to drop, but stale sequences still get trimmed.
                self.sync(stores, None, len);
                debug!(field = %self.name, op, index, len, "index out of range");
                return None;
            }
            Edit::Remove(Some(index)) => (Splice::Remove { index }, Vec::new()),
            Edit::Remove(None) => (Splice::RemoveAll, Vec::new()),
            Edit::Swap(a, b) | Edit::Move(a, b) if a >= len || b >= len => {
                debug!(field = %self.name, op, a, b, len, "index out of range");
                return None;
            }
            Edit::Swap(a, b) => (Splice::Swap { a, b }, Vec::new()),
            Edit::Move(from, to) => (Splice::Move { from, to }, Vec::new()),
            Edit::Reset => (
                Splice::Replace {
                    len: self.defaults.len(),
                },
                self.defaults.clone(),
            ),
        };
        if let Splice::Insert { count: 0, .. } = splice {
            return None;
        }

        let tagged: Vec<Row<T>> = new_rows
            .into_iter()
            .map(|value| Row::new(stores.ids.allocate(), value))
            .collect();
        splice.apply(&mut self.rows, tagged);
        self.sync(stores, Some(&splice), len);
        debug!(field = %self.name, op, ?splice, rows = self.rows.len(), "field array edited");
        Some(splice)
    }

    fn sync(&self, stores: &mut Stores<'_>, splice: Option<&Splice>, len: usize) {
        if let Some(errors) = stores.errors.as_deref_mut() {
            sync_sequence(errors, &self.path, splice, len);
        }
        if let Some(touched) = stores.touched.as_deref_mut() {
            sync_sequence(touched, &self.path, splice, len);
        }
    }
}

/// Replay `splice` on the sequence stored at `path`.
///
/// The sequence is first normalized to `len` entries (the row count before
/// the edit) so positions line up with the rows. A sequence left holding no
/// entries is pruned from the store.
fn sync_sequence(store: &mut PathStore, path: &Path, splice: Option<&Splice>, len: usize) {
    if splice.is_some_and(Splice::clears) {
        store.unset(path);
        return;
    }
    let Some(Value::Array(seq)) = store.get_mut(path) else {
        return;
    };
    seq.resize(len, Value::Null);
    if let Some(splice) = splice {
        splice.apply_placeholders(seq);
    }
    if store.get(path).is_some_and(is_empty_container) {
        store.unset(path);
    }
}
