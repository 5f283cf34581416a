//! Tool settings, layered with confique.
//!
//! Priority, highest first:
//!
//! 1. CLI flags (applied by the caller after loading)
//! 2. Environment variables (`PROPYML_OVERWRITE`, `PROPYML_LOG`)
//! 3. An explicit `--config` file
//! 4. `propyml.toml` in the current directory
//! 5. `propyml.toml` in the platform config directory
//! 6. Compiled defaults
//!
//! Settings files are checked for unknown keys before loading.

use std::path::{Path, PathBuf};

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::PropymlError;
use crate::validate;

pub const APP_NAME: &str = "propyml";
pub const FILE_NAME: &str = "propyml.toml";

#[derive(Config, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Extension given to YAML output derived from a `.properties` input
    /// ("yml" or "yaml").
    #[config(default = "yml")]
    pub yaml_extension: YamlExtension,

    /// Replace the output file if it already exists.
    #[config(default = true, env = "PROPYML_OVERWRITE")]
    pub overwrite: bool,

    /// Log filter used when RUST_LOG is not set (e.g. "warn", "propyml=debug").
    #[config(default = "warn", env = "PROPYML_LOG")]
    pub log: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum YamlExtension {
    Yml,
    Yaml,
}

impl YamlExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            YamlExtension::Yml => "yml",
            YamlExtension::Yaml => "yaml",
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            yaml_extension: YamlExtension::Yml,
            overwrite: true,
            log: "warn".into(),
        }
    }
}

impl Settings {
    /// Load settings from env and the discovered settings files.
    ///
    /// A missing `explicit` file is an error; missing discovered files are
    /// skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Settings, PropymlError> {
        let mut files = Vec::new();
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(PropymlError::IoError {
                    action: "read",
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "settings file not found",
                    ),
                });
            }
            files.push(path.to_path_buf());
        }
        files.extend(discovered_files());
        Self::load_from(&files, true)
    }

    /// Load from an explicit list of files (highest priority first),
    /// optionally layering environment variables on top.
    pub fn load_from(files: &[PathBuf], env: bool) -> Result<Settings, PropymlError> {
        for path in files {
            check_file(path)?;
        }

        let mut builder = Settings::builder();
        if env {
            builder = builder.env();
        }
        for path in files {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }
}

/// Settings files that may exist: current directory first, then the
/// platform config directory.
fn discovered_files() -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        files.push(cwd.join(FILE_NAME));
    }
    if let Some(proj) = directories::ProjectDirs::from("", "", APP_NAME) {
        files.push(proj.config_dir().join(FILE_NAME));
    }
    files
}

fn check_file(path: &Path) -> Result<(), PropymlError> {
    match std::fs::read_to_string(path) {
        Ok(content) => validate::validate_unknown_keys(&content, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PropymlError::IoError {
            action: "read",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
