//! The nested side of a conversion: a tree of mappings with string leaves.

use std::collections::BTreeMap;

use serde::Serialize;

/// Children of a mapping node, keyed by segment.
pub type Mapping = BTreeMap<String, Node>;

/// A tree node: either a scalar leaf or a mapping of further nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Scalar(String),
    Mapping(Mapping),
}

impl Node {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s),
            Node::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            Node::Scalar(_) => None,
        }
    }
}

/// The root mapping of a nested document.
///
/// Serializes as a plain mapping, so any serde format can emit it and
/// [`flatten`](crate::flatten::flatten) can walk it back into dotted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    root: Mapping,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Mapping {
        &mut self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Navigate by dotted key path (e.g. `"database.url"`).
    pub fn get(&self, dotted_key: &str) -> Option<&Node> {
        let (path, leaf) = match dotted_key.rsplit_once('.') {
            Some((p, l)) => (Some(p), l),
            None => (None, dotted_key),
        };

        let mapping = match path {
            Some(path) => {
                let mut current = &self.root;
                for segment in path.split('.') {
                    current = current.get(segment)?.as_mapping()?;
                }
                current
            }
            None => &self.root,
        };

        mapping.get(leaf)
    }
}

impl From<Mapping> for Tree {
    fn from(root: Mapping) -> Self {
        Self { root }
    }
}
