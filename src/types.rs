use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PropymlError;

/// A file format, recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Flat `key=value` lines with dotted keys (`.properties`).
    Properties,
    /// Nested mappings (`.yml` / `.yaml`).
    Yaml,
}

const SUFFIXES: [(&str, Format); 3] = [
    (".properties", Format::Properties),
    (".yml", Format::Yaml),
    (".yaml", Format::Yaml),
];

impl Format {
    /// Sniff the format from the suffix of `path`'s file name. Matching is
    /// case-sensitive, and a name that is only a suffix (`.yml`) counts.
    pub fn from_path(path: &Path) -> Option<Format> {
        Format::split_suffix(path).map(|(format, _)| format)
    }

    /// The format of `path` and the part of its file name before the suffix.
    pub fn split_suffix(path: &Path) -> Option<(Format, &str)> {
        let name = path.file_name()?.to_str()?;
        SUFFIXES
            .iter()
            .find_map(|&(suffix, format)| name.strip_suffix(suffix).map(|stem| (format, stem)))
    }
}

/// Which way a conversion runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    PropertiesToYaml,
    YamlToProperties,
}

impl Direction {
    /// Infer the direction from the input file's format.
    pub fn from_input(path: &Path) -> Result<Direction, PropymlError> {
        match Format::from_path(path) {
            Some(Format::Properties) => Ok(Direction::PropertiesToYaml),
            Some(Format::Yaml) => Ok(Direction::YamlToProperties),
            None => Err(PropymlError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::PropertiesToYaml => write!(f, "properties -> yaml"),
            Direction::YamlToProperties => write!(f, "yaml -> properties"),
        }
    }
}

/// A single conversion, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    pub input: PathBuf,
    /// Derived from `input` by extension substitution when `None`.
    pub output: Option<PathBuf>,
}
