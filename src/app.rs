//! Process-level helpers for the binary: exit codes, hints and logging.

use ipscout::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Exit statuses of `ipscout`.
pub mod exit_code {
    use std::process::ExitCode;

    /// 0: report printed, public lookup succeeded or was skipped.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// 1: bad arguments or config file; nothing was resolved.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// 2: the run started but failed, usually the public lookup.
    ///
    /// `ExitCode::from` is not `const`, hence a function.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Follows a configuration error with a suggestion, when one helps.
pub fn print_config_hint(error: &ConfigError) {
    let hint = match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            "Run 'ipscout init' to generate a configuration template."
        }
        ConfigError::InvalidUrl { .. } | ConfigError::UnsupportedScheme { .. } => {
            "The service URL must be absolute, e.g. https://api.ipify.org"
        }
        _ => return,
    };
    eprintln!("\n{hint}");
}

/// Installs the fmt subscriber: INFO by default, DEBUG with `--verbose`,
/// `RUST_LOG` overrides both.
///
/// Logs go to stderr; stdout carries only the report.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
