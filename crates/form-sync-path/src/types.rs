//! Type definitions for form paths.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::util::{format_path, is_integer, parse_path};
use crate::validate::MAX_INDEX;
use crate::PathError;

/// A step in a [`Path`].
///
/// Object keys and array indices are kept apart so that writes know which
/// kind of container to create for a missing intermediate step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object descent: `.name` or `["name"]`.
    Key(String),
    /// Array indexing: `[0]`.
    Index(usize),
}

impl Segment {
    pub fn key(key: impl Into<String>) -> Self {
        Segment::Key(key.into())
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// The array position this step addresses, if any.
    ///
    /// Key steps made only of digits (`a.0`) also address array elements,
    /// up to [`MAX_INDEX`]; larger digit keys stay plain object keys.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(idx) => Some(*idx),
            Segment::Key(key) if is_integer(key) => {
                key.parse::<usize>().ok().filter(|idx| *idx <= MAX_INDEX)
            }
            Segment::Key(_) => None,
        }
    }

    /// The object key this step addresses.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Segment::Key(key) => Cow::Borrowed(key),
            Segment::Index(idx) => Cow::Owned(idx.to_string()),
        }
    }
}

impl From<usize> for Segment {
    fn from(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

/// A parsed form path such as `addresses[1].city`.
///
/// Parse once with [`str::parse`] and reuse; the store never re-parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The empty path, addressing the store root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// A simple path is a single object key with no separators.
    pub fn is_simple(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::Key(_)])
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// The path of the containing value, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        let (_, init) = self.segments.split_last()?;
        Some(Path::new(init.to_vec()))
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<Segment>) -> Path {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Path::new(segments)
    }

    /// Returns true if `prefix` is equal to, or an ancestor of, this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_path(&self.segments))
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path::new(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_as_index() {
        assert_eq!(Segment::Index(3).as_index(), Some(3));
        assert_eq!(Segment::key("3").as_index(), Some(3));
        assert_eq!(Segment::key("city").as_index(), None);
        assert_eq!(Segment::key("65536").as_index(), None);
        assert_eq!(Segment::key("18446744073709551616").as_index(), None);
    }

    #[test]
    fn test_segment_as_key() {
        assert_eq!(Segment::Index(7).as_key(), "7");
        assert_eq!(Segment::key("city").as_key(), "city");
    }

    #[test]
    fn test_path_parent_and_child() {
        let path: Path = "addresses[1].city".parse().unwrap();
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "addresses[1]");
        assert_eq!(parent.child("city"), path);
        assert!(Path::root().parent().is_none());
    }

    #[test]
    fn test_path_is_simple() {
        assert!("test".parse::<Path>().unwrap().is_simple());
        assert!(!"test[0]".parse::<Path>().unwrap().is_simple());
        assert!(!"a.b".parse::<Path>().unwrap().is_simple());
    }

    #[test]
    fn test_path_starts_with() {
        let row: Path = "test[1]".parse().unwrap();
        let leaf: Path = "test[1].name".parse().unwrap();
        let other: Path = "test[2].name".parse().unwrap();
        assert!(leaf.starts_with(&row));
        assert!(row.starts_with(&row));
        assert!(!other.starts_with(&row));
        assert!(leaf.starts_with(&Path::root()));
    }
}
