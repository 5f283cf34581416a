//! Strict settings validation: detect unknown keys in settings files.
//!
//! Uses `serde_ignored` to deserialize into the settings layer (all-optional
//! fields) and capture any keys the layer doesn't consume. Reports each
//! unknown key with its file path and best-effort line number.

use std::path::Path;

use confique::Config;

use crate::error::PropymlError;
use crate::settings::Settings;

type SettingsLayer = <Settings as Config>::Layer;

/// Validate that a TOML settings file contains no keys unknown to [`Settings`].
pub fn validate_unknown_keys(content: &str, path: &Path) -> Result<(), PropymlError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: SettingsLayer = serde_ignored::deserialize(deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| PropymlError::SettingsParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors: Vec<PropymlError> = unknown_keys
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            PropymlError::UnknownSetting {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(PropymlError::UnknownSettings(errors))
}

/// 1-indexed line of the first assignment to `dotted_key`'s leaf, or 0 if it
/// cannot be located. Tables and quoted keys are not tracked.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let leaf = dotted_key.rsplit('.').next().unwrap_or(dotted_key);

    content
        .lines()
        .position(|line| {
            line.trim()
                .strip_prefix(leaf)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map_or(0, |i| i + 1)
}
