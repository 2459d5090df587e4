//! Application execution logic.
//!
//! Builds the selector and public fetcher from the validated config, runs
//! one resolution and writes the report to stdout.

use thiserror::Error;

use ipscout::config::{OutputFormat, ValidatedConfig};
use ipscout::network::LocalAddressSelector;
use ipscout::public::{LookupError, PublicIpFetcher};
use ipscout::report::{NetworkReport, StaticBindAddress, resolve};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The HTTP client for the public lookup could not be set up.
    #[error("Failed to set up public IP lookup: {0}")]
    ClientSetup(#[source] LookupError),

    /// The public lookup ran and failed; the report was still printed.
    #[error("Public IP lookup failed: {0}")]
    PublicLookup(#[source] LookupError),

    /// The report could not be serialized.
    #[error("Failed to render report: {0}")]
    Render(#[source] serde_json::Error),
}

impl RunError {
    /// True when the failure was already logged by [`resolve`] and shown
    /// in the printed report.
    #[must_use]
    pub const fn already_reported(&self) -> bool {
        matches!(self, Self::PublicLookup(_))
    }
}

/// Resolves all addresses once and prints the report.
///
/// # Errors
///
/// Returns an error if:
/// - The public lookup client cannot be built
/// - The report cannot be rendered
/// - The public lookup ran and failed (after printing the report)
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// platform network APIs and outbound HTTP.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let selector = LocalAddressSelector::system().with_name_excludes(config.exclude_interfaces);

    let public = if config.lookup_public {
        let setup = PublicIpFetcher::from_config(&config.resolver);
        Some(setup.map_err(RunError::ClientSetup)?)
    } else {
        None
    };

    let provider = StaticBindAddress::new(config.bind_address);

    let report = resolve(selector, public, &provider).await;

    println!("{}", render(&report, config.format)?);
    into_outcome(report)
}

/// Renders the report in the requested format.
fn render(report: &NetworkReport, format: OutputFormat) -> Result<String, RunError> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => report.to_json().map_err(RunError::Render),
    }
}

/// Maps a printed report to the process outcome.
///
/// A skipped lookup is a success; a failed one is a runtime error.
fn into_outcome(report: NetworkReport) -> Result<(), RunError> {
    match report.public_ip {
        Some(Err(e)) => Err(RunError::PublicLookup(e)),
        Some(Ok(_)) | None => Ok(()),
    }
}
