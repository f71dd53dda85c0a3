//! Index-level edits shared by the row list and its parallel sequences.
//!
//! A [`Splice`] is computed once per structural operation and then replayed
//! on every sequence that must stay index-aligned with the rows, so the rows,
//! the error sequence, and the touched sequence are permuted identically.

use std::iter;

use serde_json::Value;

/// One structural edit over an index-addressed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splice {
    /// `count` new items at `index`, shifting later items right.
    Insert { index: usize, count: usize },
    /// Drop the item at `index`, shifting later items left.
    Remove { index: usize },
    /// Drop every item.
    RemoveAll,
    Swap { a: usize, b: usize },
    /// Take the item at `from` out and reinsert it at `to`.
    Move { from: usize, to: usize },
    /// Replace every item with `len` fresh ones.
    Replace { len: usize },
}

impl Splice {
    /// Number of items this edit introduces.
    pub fn inserted(&self) -> usize {
        match self {
            Splice::Insert { count, .. } => *count,
            Splice::Replace { len } => *len,
            _ => 0,
        }
    }

    /// Returns true when the edit discards every parallel entry at its path.
    pub fn clears(&self) -> bool {
        matches!(self, Splice::RemoveAll | Splice::Replace { .. })
    }

    /// Apply the edit to `items`. `inserted` supplies the new items for
    /// `Insert` and `Replace` and is ignored otherwise.
    ///
    /// Out-of-range positions leave `items` untouched; an insert index past
    /// the end appends.
    pub fn apply<T>(&self, items: &mut Vec<T>, inserted: impl IntoIterator<Item = T>) {
        let len = items.len();
        match *self {
            Splice::Insert { index, .. } => {
                let index = index.min(len);
                items.splice(index..index, inserted);
            }
            Splice::Remove { index } => {
                if index < len {
                    items.remove(index);
                }
            }
            Splice::RemoveAll => items.clear(),
            Splice::Swap { a, b } => {
                if a < len && b < len {
                    items.swap(a, b);
                }
            }
            Splice::Move { from, to } => {
                if from < len && to < len {
                    let item = items.remove(from);
                    items.insert(to, item);
                }
            }
            Splice::Replace { .. } => {
                items.clear();
                items.extend(inserted);
            }
        }
    }

    /// Apply the edit to a parallel sequence, inserting `null` placeholders.
    pub fn apply_placeholders(&self, seq: &mut Vec<Value>) {
        self.apply(seq, iter::repeat(Value::Null).take(self.inserted()));
    }

    /// Where the item formerly at `old` lives after the edit, or `None` if
    /// the edit dropped it.
    pub fn map_index(&self, old: usize) -> Option<usize> {
        match *self {
            Splice::Insert { index, count } => Some(if old >= index { old + count } else { old }),
            Splice::Remove { index } => match old.cmp(&index) {
                std::cmp::Ordering::Less => Some(old),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(old - 1),
            },
            Splice::RemoveAll => None,
            Splice::Swap { a, b } => Some(if old == a {
                b
            } else if old == b {
                a
            } else {
                old
            }),
            Splice::Move { from, to } => Some(if old == from {
                to
            } else if from < to && old > from && old <= to {
                old - 1
            } else if to < from && old >= to && old < from {
                old + 1
            } else {
                old
            }),
            Splice::Replace { len } => (old < len).then_some(old),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seq(v: Value) -> Vec<Value> {
        match v {
            Value::Array(items) => items,
            _ => panic!("not an array"),
        }
    }

    #[test]
    fn test_insert_placeholders() {
        let mut items = seq(json!(["e1", "e2", "e3"]));
        Splice::Insert { index: 0, count: 1 }.apply_placeholders(&mut items);
        assert_eq!(items, seq(json!([null, "e1", "e2", "e3"])));

        let mut items = seq(json!(["e1", "e2", "e3"]));
        Splice::Insert { index: 1, count: 2 }.apply_placeholders(&mut items);
        assert_eq!(items, seq(json!(["e1", null, null, "e2", "e3"])));
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut items = vec![1, 2];
        Splice::Insert { index: 9, count: 1 }.apply(&mut items, [3]);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_remove() {
        let mut items = vec!["a", "b", "c"];
        Splice::Remove { index: 1 }.apply(&mut items, []);
        assert_eq!(items, vec!["a", "c"]);
        Splice::Remove { index: 5 }.apply(&mut items, []);
        assert_eq!(items, vec!["a", "c"]);
    }

    #[test]
    fn test_swap_and_move() {
        let mut items = vec!["a", "b", "c"];
        Splice::Swap { a: 0, b: 2 }.apply(&mut items, []);
        assert_eq!(items, vec!["c", "b", "a"]);

        let mut items = vec!["a", "b", "c"];
        Splice::Move { from: 2, to: 0 }.apply(&mut items, []);
        assert_eq!(items, vec!["c", "a", "b"]);

        let mut items = vec!["a", "b", "c"];
        Splice::Move { from: 0, to: 2 }.apply(&mut items, []);
        assert_eq!(items, vec!["b", "c", "a"]);

        Splice::Swap { a: 0, b: 3 }.apply(&mut items, []);
        assert_eq!(items, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_map_index_agrees_with_apply() {
        let splices = [
            Splice::Insert { index: 1, count: 2 },
            Splice::Remove { index: 1 },
            Splice::Swap { a: 0, b: 3 },
            Splice::Move { from: 3, to: 1 },
            Splice::Move { from: 0, to: 2 },
            Splice::Replace { len: 2 },
            Splice::RemoveAll,
        ];
        for splice in splices {
            let before: Vec<usize> = (0..4).collect();
            let mut after: Vec<Option<usize>> = before.iter().copied().map(Some).collect();
            splice.apply(&mut after, iter::repeat(None).take(splice.inserted()));
            for old in before {
                match splice.map_index(old) {
                    Some(new) if !splice.clears() => assert_eq!(after[new], Some(old), "{splice:?}"),
                    Some(_) => {}
                    None => assert!(!after.contains(&Some(old)), "{splice:?}"),
                }
            }
        }
    }
}
