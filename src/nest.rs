//! Expand dotted keys into a nested tree.
//!
//! Each `("database.url", "pg://")` entry materializes the intermediate
//! mappings it needs: `{database: {url: "pg://"}}`.
//!
//! A key set where one path must be both a value and a section
//! (`a = 1` next to `a.b = 2`) is rejected with
//! [`StructuralConflict`](PropymlError::StructuralConflict) naming both keys,
//! whatever order the keys arrive in.

use crate::error::PropymlError;
use crate::key::KeyPath;
use crate::store::FlatStore;
use crate::tree::{Mapping, Node, Tree};

/// Build a tree from every entry of `store`.
pub fn build(store: &FlatStore) -> Result<Tree, PropymlError> {
    build_entries(store.iter())
}

/// Build a tree from `(dotted_key, value)` pairs in the order given.
///
/// A later entry for the exact same key replaces the earlier value.
pub fn build_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Result<Tree, PropymlError>
where
    K: AsRef<str>,
    V: Into<String>,
{
    let mut tree = Tree::new();
    for (key, value) in entries {
        let path = KeyPath::parse(key.as_ref())?;
        set_nested(tree.root_mut(), &path, value.into())?;
    }
    Ok(tree)
}

fn set_nested(root: &mut Mapping, path: &KeyPath, value: String) -> Result<(), PropymlError> {
    let (parents, leaf) = path.split_last();
    let mut current = root;

    for (depth, segment) in parents.iter().enumerate() {
        let node = current
            .entry(segment.clone())
            .or_insert_with(|| Node::Mapping(Mapping::new()));
        current = match node {
            Node::Mapping(mapping) => mapping,
            Node::Scalar(_) => {
                let at = path.prefix(depth + 1);
                return Err(PropymlError::StructuralConflict {
                    path: at.clone(),
                    existing: at,
                    incoming: path.to_string(),
                });
            }
        };
    }

    if let Some(Node::Mapping(children)) = current.get(leaf) {
        let at = path.to_string();
        return Err(PropymlError::StructuralConflict {
            existing: first_leaf_key(&at, children),
            incoming: at.clone(),
            path: at,
        });
    }

    current.insert(leaf.to_string(), Node::Scalar(value));
    Ok(())
}

/// Full key of some leaf under `mapping`, used to name the key that claimed
/// `prefix` as a section.
fn first_leaf_key(prefix: &str, mapping: &Mapping) -> String {
    match mapping.iter().next() {
        Some((segment, Node::Scalar(_))) => format!("{prefix}.{segment}"),
        Some((segment, Node::Mapping(children))) => {
            first_leaf_key(&format!("{prefix}.{segment}"), children)
        }
        None => prefix.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::store;

    fn scalar<'a>(tree: &'a Tree, key: &str) -> &'a str {
        tree.get(key).and_then(Node::as_scalar).unwrap()
    }

    #[test]
    fn flat_key_binds_under_root() {
        let tree = build(&store(&[("host", "0.0.0.0")])).unwrap();
        assert_eq!(scalar(&tree, "host"), "0.0.0.0");
        assert_eq!(tree.root().len(), 1);
    }

    #[test]
    fn nested_keys_share_sections() {
        let tree = build(&store(&[
            ("db.host", "localhost"),
            ("db.port", "5432"),
            ("app.name", "demo"),
        ]))
        .unwrap();
        assert_eq!(scalar(&tree, "db.host"), "localhost");
        assert_eq!(scalar(&tree, "db.port"), "5432");
        assert_eq!(scalar(&tree, "app.name"), "demo");
        assert_eq!(tree.root().len(), 2);
        assert_eq!(tree.get("db").and_then(Node::as_mapping).unwrap().len(), 2);
    }

    #[test]
    fn values_stay_strings() {
        let tree = build(&store(&[("flag", "true"), ("count", "42")])).unwrap();
        assert_eq!(tree.get("flag"), Some(&Node::Scalar("true".into())));
        assert_eq!(tree.get("count"), Some(&Node::Scalar("42".into())));
    }

    #[test]
    fn deep_nesting() {
        let tree = build(&store(&[("a.b.c.d", "42")])).unwrap();
        assert_eq!(scalar(&tree, "a.b.c.d"), "42");
    }

    #[test]
    fn empty_store_gives_empty_tree() {
        let tree = build(&FlatStore::new()).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn conflict_value_then_section() {
        let err = build_entries([("a", "2"), ("a.b", "1")]).unwrap_err();
        match err {
            PropymlError::StructuralConflict {
                path,
                existing,
                incoming,
            } => {
                assert_eq!(path, "a");
                assert_eq!(existing, "a");
                assert_eq!(incoming, "a.b");
            }
            other => panic!("Expected StructuralConflict, got {other:?}"),
        }
    }

    #[test]
    fn conflict_section_then_value() {
        let err = build_entries([("a.b", "1"), ("a", "2")]).unwrap_err();
        match err {
            PropymlError::StructuralConflict {
                path,
                existing,
                incoming,
            } => {
                assert_eq!(path, "a");
                assert_eq!(existing, "a.b");
                assert_eq!(incoming, "a");
            }
            other => panic!("Expected StructuralConflict, got {other:?}"),
        }
    }

    #[test]
    fn conflict_detected_from_store() {
        let err = build(&store(&[("a.b", "1"), ("a", "2")])).unwrap_err();
        assert!(matches!(
            err,
            PropymlError::StructuralConflict { ref path, .. } if path == "a"
        ));
    }

    #[test]
    fn conflict_at_intermediate_depth() {
        let err = build_entries([("a.b", "1"), ("a.b.c.d", "2")]).unwrap_err();
        match err {
            PropymlError::StructuralConflict { path, incoming, .. } => {
                assert_eq!(path, "a.b");
                assert_eq!(incoming, "a.b.c.d");
            }
            other => panic!("Expected StructuralConflict, got {other:?}"),
        }
    }

    #[test]
    fn conflict_names_deep_existing_leaf() {
        let err = build_entries([("a.b.c", "1"), ("a.b", "2")]).unwrap_err();
        match err {
            PropymlError::StructuralConflict { existing, .. } => {
                assert_eq!(existing, "a.b.c");
            }
            other => panic!("Expected StructuralConflict, got {other:?}"),
        }
    }

    #[test]
    fn sibling_prefix_is_not_a_conflict() {
        let tree = build(&store(&[("a", "1"), ("ab.c", "2"), ("a-b.c", "3")])).unwrap();
        assert_eq!(scalar(&tree, "a"), "1");
        assert_eq!(scalar(&tree, "ab.c"), "2");
        assert_eq!(scalar(&tree, "a-b.c"), "3");
    }

    #[test]
    fn same_key_last_entry_wins() {
        let tree = build_entries([("port", "3000"), ("port", "5000")]).unwrap();
        assert_eq!(scalar(&tree, "port"), "5000");
    }

    #[test]
    fn invalid_key_rejected() {
        let err = build(&store(&[("a..b", "1")])).unwrap_err();
        assert!(matches!(err, PropymlError::InvalidKey { .. }));
    }
}
