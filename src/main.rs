//! ipscout command-line entry point.
//!
//! Parses arguments, writes a config template for `init`, otherwise
//! resolves addresses once and prints the report to stdout.

use std::path::Path;
use std::process::ExitCode;

use ipscout::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match &cli.command {
        Some(Command::Init { output }) => init(output),
        None => match ValidatedConfig::load(&cli) {
            Ok(config) => resolve_once(config),
            Err(e) => {
                eprintln!("Configuration error: {e}");
                print_config_hint(&e);
                exit_code::CONFIG_ERROR
            }
        },
    }
}

/// `ipscout init`: writes the commented template and reports where.
fn init(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("Error: {e}");
        return exit_code::CONFIG_ERROR;
    }
    println!("Configuration template written to: {}", output.display());
    exit_code::SUCCESS
}

/// Starts logging and a runtime, then runs one resolution on it.
#[cfg(not(tarpaulin_include))]
fn resolve_once(config: ValidatedConfig) -> ExitCode {
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Cannot start async runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            if !e.already_reported() {
                tracing::error!("{e}");
            }
            exit_code::runtime_error()
        }
    }
}
