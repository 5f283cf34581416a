use std::fmt::Display;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropymlError {
    #[error("Failed to {action} {path}: {source}")]
    IoError {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error(
        "Structural conflict at '{path}': '{existing}' and '{incoming}' cannot both be set \
         ('{path}' would have to be both a value and a section)"
    )]
    StructuralConflict {
        path: String,
        existing: String,
        incoming: String,
    },

    #[error("Unsupported {shape} value at '{key}': only mappings and scalars can be flattened")]
    UnsupportedValueShape { key: String, shape: &'static str },

    #[error("Key '{key}' is produced by more than one path in the tree")]
    DuplicateKey { key: String },

    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Document root must be a mapping, found a {shape}")]
    RootNotMapping { shape: &'static str },

    #[error("Unsupported file type for {path}: expected .properties, .yml or .yaml")]
    UnsupportedFormat { path: PathBuf },

    #[error("Output file {path} already exists (overwrite is disabled)")]
    OutputExists { path: PathBuf },

    #[error("Failed to encode YAML: {0}")]
    Encode(#[from] serde_yaml::Error),

    #[error("Failed to parse settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown setting '{key}' in {path} (line {line})")]
    UnknownSetting {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in settings file")]
    UnknownSettings(Vec<PropymlError>),

    #[error("Settings error: {0}")]
    SettingsError(#[from] confique::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Lets the flattening serializer report failures in the crate's own error type.
impl serde::ser::Error for PropymlError {
    fn custom<T: Display>(msg: T) -> Self {
        PropymlError::Serialize(msg.to_string())
    }
}
