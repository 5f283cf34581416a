//! Convert configuration between flat `.properties` files with dotted keys and
//! nested YAML documents.
//!
//! ```ignore
//! let yaml = propyml::ops::properties_to_yaml("db.host=localhost\ndb.port=5432\n")?;
//! assert_eq!(yaml, "db:\n  host: localhost\n  port: '5432'\n");
//! ```
//!
//! # Model
//!
//! The flat side is a [`FlatStore`]: unique dotted keys mapped to string
//! values. The nested side is a [`Tree`] of mappings with string leaves.
//! Values are never interpreted: `5432` read from a properties file stays the
//! string `"5432"` in the tree.
//!
//! Three transformations connect them:
//!
//! - [`nest::build`] expands dotted keys into a tree, materializing
//!   intermediate mappings on demand.
//! - [`flatten::flatten`] walks any serializable tree (a parsed
//!   `serde_yaml::Value`, a [`Tree`], a config struct) back into dotted keys,
//!   turning numbers, booleans and nulls into their canonical text.
//! - [`writer::write_lines`] renders a store as sorted `key=value` lines,
//!   with a blank line between top-level sections.
//!
//! # Conflicts
//!
//! A key set where one path must be both a value and a section, such as
//! `a=1` next to `a.b=2`, is a
//! [`StructuralConflict`](PropymlError::StructuralConflict). It is reported
//! with both keys, never resolved by overwriting, and does not depend on the
//! order the keys appear in the file.
//!
//! Sequences in a YAML document have no flat-key form and are reported as
//! [`UnsupportedValueShape`](PropymlError::UnsupportedValueShape) with the
//! offending key.
//!
//! # Settings
//!
//! The binary reads optional [`Settings`] from `propyml.toml` files and
//! `PROPYML_*` environment variables; see the [`settings`] module.

pub mod error;
pub mod flatten;
pub mod key;
pub mod nest;
pub mod ops;
pub mod properties;
pub mod settings;
pub mod store;
pub mod tree;
pub mod types;
pub mod writer;
pub mod yaml;

#[cfg(feature = "cli")]
pub mod cli;
mod validate;

#[cfg(test)]
mod fixtures;

pub use error::PropymlError;
pub use key::KeyPath;
pub use ops::{ConvertResult, convert};
pub use settings::{Settings, YamlExtension};
pub use store::FlatStore;
pub use tree::{Mapping, Node, Tree};
pub use types::{ConvertRequest, Direction, Format};
