//! Paths into nested values, used for error context.
//!
//! Every [`CheckError`](crate::CheckError) carries a [`ValuePath`] locating
//! the offending position in the input value (e.g. `user.emails[0]`).

use std::fmt::{self, Display};

/// A single step in a [`ValuePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object field access (e.g. `email`).
    Field(String),
    /// An array index access (e.g. `[3]`).
    Index(usize),
}

/// A path to a position in a nested value.
///
/// Paths are built immutably during traversal: pushing a segment returns a
/// new path and leaves the original untouched, so sibling descents never
/// see each other's segments.
///
/// # Example
///
/// ```rust
/// use chek::ValuePath;
///
/// let path = ValuePath::root().push_field("users").push_index(0);
/// assert_eq!(path.to_string(), "users[0]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    /// The empty path, representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// True if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The last segment, or `None` at the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_empty() {
        let path = ValuePath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_field_then_index() {
        let path = ValuePath::root().push_field("users").push_index(0);
        assert_eq!(path.to_string(), "users[0]");
        assert_eq!(path.last(), Some(&PathSegment::Index(0)));
    }

    #[test]
    fn test_nested_fields() {
        let path = ValuePath::root().push_field("o1").push_field("s1");
        assert_eq!(path.to_string(), "o1.s1");
    }

    #[test]
    fn test_index_at_root() {
        let path = ValuePath::root().push_index(3);
        assert_eq!(path.to_string(), "[3]");
    }

    #[test]
    fn test_push_does_not_mutate() {
        let base = ValuePath::root().push_field("items");
        let a = base.push_index(0);
        let b = base.push_index(1);
        assert_eq!(base.to_string(), "items");
        assert_eq!(a.to_string(), "items[0]");
        assert_eq!(b.to_string(), "items[1]");
    }

    #[test]
    fn test_deeply_nested_display() {
        let path = ValuePath::root()
            .push_field("body")
            .push_field("data")
            .push_index(42)
            .push_field("name");
        assert_eq!(path.to_string(), "body.data[42].name");
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments.len(), 4);
    }
}
