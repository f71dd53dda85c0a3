//! Row identities.

use std::fmt;

/// An opaque token keying one field-array row across reorderings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues monotonically increasing row identities.
///
/// Tokens are unique among the rows of one allocator; they are not meant to
/// survive a restart.
#[derive(Debug, Clone)]
pub struct IdentityAllocator {
    next: u64,
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityAllocator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn allocate(&mut self) -> RowId {
        let id = RowId(self.next.to_string());
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_is_monotonic() {
        let mut ids = IdentityAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert_eq!(a.as_str(), "1");
        assert_eq!(b.as_str(), "2");
        assert_ne!(a, b);
    }

    #[test]
    fn test_starting_at() {
        let mut ids = IdentityAllocator::starting_at(40);
        assert_eq!(ids.allocate().to_string(), "40");
        assert_eq!(ids.allocate().to_string(), "41");
    }
}
