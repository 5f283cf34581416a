//! Render a [`FlatStore`] as `key=value` lines grouped into sections.
//!
//! Keys come out in ascending byte order. A section is the first dotted
//! segment of a key; a single blank line separates consecutive keys whose
//! sections differ. Keys and values are written verbatim, without quoting or
//! escaping.

use crate::key::KeyPath;
use crate::store::FlatStore;

/// Produce the output lines for `store`, each terminated by `\n`.
///
/// Section separators appear as `"\n"` entries.
pub fn write_lines(store: &FlatStore) -> Vec<String> {
    let mut lines = Vec::with_capacity(store.len());
    let mut last_section: Option<&str> = None;

    for (key, value) in store.iter() {
        let section = KeyPath::section_of(key);
        if last_section.is_some_and(|last| last != section) {
            lines.push("\n".to_string());
        }
        lines.push(format!("{key}={value}\n"));
        last_section = Some(section);
    }

    lines
}

/// The whole rendered document as one string.
pub fn render(store: &FlatStore) -> String {
    write_lines(store).concat()
}
