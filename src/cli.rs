//! Clap adapter for the `propyml` binary.
//!
//! Compiled only with the `cli` Cargo feature (on by default). The only
//! bridge to the core is [`ConvertArgs::into_request()`], which turns parsed
//! flags into a [`ConvertRequest`]; [`ConvertArgs::apply_overrides()`] layers
//! flag-level settings on top of the loaded [`Settings`].

use std::path::PathBuf;

use clap::Parser;

use crate::settings::Settings;
use crate::types::ConvertRequest;

/// Convert between dotted-key .properties files and nested YAML.
///
/// The direction is picked from the input extension: `.properties` becomes
/// YAML, `.yml`/`.yaml` becomes properties.
#[derive(Debug, Parser)]
#[command(name = "propyml", version)]
pub struct ConvertArgs {
    /// Path to the input file (.properties, .yml or .yaml).
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Path to the output file. Defaults to the input with its extension swapped.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Read settings from this file in addition to the discovered ones.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    pub no_clobber: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl ConvertArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConvertRequest`.
    pub fn into_request(self) -> ConvertRequest {
        ConvertRequest {
            input: self.input,
            output: self.output,
        }
    }

    /// Apply flag overrides (highest priority) to loaded settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if self.no_clobber {
            settings.overwrite = false;
        }
        if self.quiet {
            settings.log = "error".into();
        } else {
            match self.verbose {
                0 => {}
                1 => settings.log = "debug".into(),
                _ => settings.log = "trace".into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ConvertArgs {
        ConvertArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn parse_input_only() {
        let request = parse(&["propyml", "-i", "app.properties"]).into_request();
        assert_eq!(
            request,
            ConvertRequest {
                input: PathBuf::from("app.properties"),
                output: None,
            }
        );
    }

    #[test]
    fn parse_input_and_output() {
        let request = parse(&["propyml", "-i", "app.yml", "-o", "out.properties"]).into_request();
        assert_eq!(request.output, Some(PathBuf::from("out.properties")));
    }

    #[test]
    fn parse_equals_syntax() {
        let request =
            parse(&["propyml", "-i=app.yml", "--output=conf/app.properties"]).into_request();
        assert_eq!(request.input, PathBuf::from("app.yml"));
        assert_eq!(request.output, Some(PathBuf::from("conf/app.properties")));
    }

    #[test]
    fn missing_input_errors() {
        assert!(ConvertArgs::try_parse_from(["propyml", "-o", "x.yml"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(ConvertArgs::try_parse_from(["propyml", "-i", "a.yml", "-q", "-v"]).is_err());
    }

    #[test]
    fn no_clobber_disables_overwrite() {
        let args = parse(&["propyml", "-i", "a.yml", "--no-clobber"]);
        let mut settings = Settings::default();
        args.apply_overrides(&mut settings);
        assert!(!settings.overwrite);
    }

    #[test]
    fn verbosity_sets_log_filter() {
        let mut settings = Settings::default();
        parse(&["propyml", "-i", "a.yml", "-v"]).apply_overrides(&mut settings);
        assert_eq!(settings.log, "debug");

        parse(&["propyml", "-i", "a.yml", "-vv"]).apply_overrides(&mut settings);
        assert_eq!(settings.log, "trace");

        parse(&["propyml", "-i", "a.yml", "-q"]).apply_overrides(&mut settings);
        assert_eq!(settings.log, "error");
    }

    #[test]
    fn no_flags_keep_settings() {
        let mut settings = Settings::default();
        parse(&["propyml", "-i", "a.yml"]).apply_overrides(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn config_flag_parsed() {
        let args = parse(&["propyml", "-i", "a.yml", "--config", "custom.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
    }
}
