//! Dotted key paths: `database.pool.size` ↔ `["database", "pool", "size"]`.

use std::fmt;

use crate::error::PropymlError;

/// A dotted key split into its segments.
///
/// The leaf segment is stored apart from its parents, so a path always has
/// one. No segment is empty, so joining the segments with `.` gives back
/// exactly the key that was parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    parents: Vec<String>,
    leaf: String,
}

impl KeyPath {
    /// Split `key` on `.`. Empty keys and empty segments (`a..b`, `.a`, `a.`)
    /// are rejected.
    pub fn parse(key: &str) -> Result<Self, PropymlError> {
        let mut parents: Vec<String> = key.split('.').map(str::to_string).collect();
        let leaf = match parents.pop() {
            Some(leaf) if !key.is_empty() => leaf,
            _ => {
                return Err(PropymlError::InvalidKey {
                    key: key.into(),
                    reason: "key is empty".into(),
                });
            }
        };
        if leaf.is_empty() || parents.iter().any(String::is_empty) {
            return Err(PropymlError::InvalidKey {
                key: key.into(),
                reason: "key contains an empty segment".into(),
            });
        }
        Ok(Self { parents, leaf })
    }

    /// All segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.parents
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.leaf.as_str()))
    }

    /// The section a raw dotted key is grouped under in flat output: its
    /// first segment, or the whole key when it has no dot.
    pub fn section_of(key: &str) -> &str {
        key.split_once('.').map_or(key, |(section, _)| section)
    }

    /// Intermediate segments and the leaf segment.
    pub fn split_last(&self) -> (&[String], &str) {
        (&self.parents, &self.leaf)
    }

    /// Dotted form of the first `n` segments.
    pub fn prefix(&self, n: usize) -> String {
        self.segments().take(n).collect::<Vec<_>>().join(".")
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for parent in &self.parents {
            write!(f, "{parent}.")?;
        }
        f.write_str(&self.leaf)
    }
}
