//! Conversion operations and their result type.
//!
//! [`convert`] runs one whole conversion: sniff the direction, read the
//! input, transform, write the output. The pure text-to-text halves are
//! exposed separately so they can be used without touching the filesystem.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, info};

use crate::error::PropymlError;
use crate::flatten;
use crate::nest;
use crate::properties;
use crate::settings::Settings;
use crate::types::{ConvertRequest, Direction, Format};
use crate::writer;
use crate::yaml;

/// Result of a conversion. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub direction: Direction,
    /// Number of flat keys read or written.
    pub entries: usize,
}

impl fmt::Display for ConvertResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Conversion complete: {} -> {}",
            self.input.display(),
            self.output.display()
        )
    }
}

/// Nest properties text into a YAML document.
pub fn properties_to_yaml(text: &str) -> Result<String, PropymlError> {
    let store = properties::parse(text);
    let tree = nest::build(&store)?;
    yaml::to_string(&tree)
}

/// Flatten a parsed YAML document into properties text.
pub fn yaml_to_properties(value: &Value) -> Result<String, PropymlError> {
    let store = flatten::flatten(value)?;
    Ok(writer::render(&store))
}

/// Output path used when none is given: the input with its format suffix
/// swapped.
pub fn derive_output(input: &Path, direction: Direction, settings: &Settings) -> PathBuf {
    let extension = match direction {
        Direction::PropertiesToYaml => settings.yaml_extension.as_str(),
        Direction::YamlToProperties => "properties",
    };
    match Format::split_suffix(input) {
        Some((_, stem)) => input.with_file_name(format!("{stem}.{extension}")),
        None => input.with_extension(extension),
    }
}

/// Run one conversion end to end.
pub fn convert(
    request: &ConvertRequest,
    settings: &Settings,
) -> Result<ConvertResult, PropymlError> {
    let input = request.input.as_path();
    let direction = Direction::from_input(input)?;
    let output = request
        .output
        .clone()
        .unwrap_or_else(|| derive_output(input, direction, settings));
    debug!(input = %input.display(), output = %output.display(), %direction, "converting");

    let entries = match direction {
        Direction::PropertiesToYaml => {
            let store = properties::read(input)?;
            debug!(entries = store.len(), "parsed properties");
            let tree = nest::build(&store)?;
            let text = yaml::to_string(&tree)?;
            let mut file = create_output(&output, settings.overwrite)?;
            file.write_all(text.as_bytes())
                .map_err(|e| PropymlError::IoError {
                    action: "write",
                    path: output.clone(),
                    source: e,
                })?;
            store.len()
        }
        Direction::YamlToProperties => {
            let value = yaml::read(input)?;
            let store = flatten::flatten(&value)?;
            debug!(entries = store.len(), "flattened yaml");
            let lines = writer::write_lines(&store);
            let file = create_output(&output, settings.overwrite)?;
            properties::write_file(file, &output, &lines)?;
            store.len()
        }
    };

    info!(output = %output.display(), entries, "wrote output");
    Ok(ConvertResult {
        input: input.to_path_buf(),
        output,
        direction,
        entries,
    })
}

fn create_output(path: &Path, overwrite: bool) -> Result<File, PropymlError> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => PropymlError::OutputExists {
            path: path.to_path_buf(),
        },
        _ => PropymlError::IoError {
            action: "create",
            path: path.to_path_buf(),
            source: e,
        },
    })
}
