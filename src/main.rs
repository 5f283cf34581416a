use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use propyml::cli::ConvertArgs;
use propyml::{ConvertResult, PropymlError, Settings};

fn main() -> ExitCode {
    let args = ConvertArgs::parse();
    match run(args) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let PropymlError::UnknownSettings(errors) = &e {
                for err in errors {
                    eprintln!("  {err}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: ConvertArgs) -> Result<ConvertResult, PropymlError> {
    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply_overrides(&mut settings);
    init_tracing(&settings.log);

    let request = args.into_request();
    propyml::convert(&request, &settings)
}

/// `RUST_LOG` wins over the settings/flag filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
