//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong before a lookup starts.
///
/// All variants map to exit code 1.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--config` file could not be read.
    #[error("Cannot read config file '{}': {source}", path.display())]
    FileRead {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Config file is not valid: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `init` could not write the template.
    #[error("Cannot write config file '{}': {source}", path.display())]
    FileWrite {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The service URL does not parse.
    #[error("Invalid service URL '{url}': {source}")]
    InvalidUrl {
        /// The rejected value
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// The service URL parses but is not http or https.
    #[error("Unsupported scheme '{scheme}' in service URL '{url}': expected http or https")]
    UnsupportedScheme {
        /// The rejected value
        url: String,
        /// Its scheme
        scheme: String,
    },

    /// The lookup timeout is zero.
    #[error("Invalid timeout {seconds}s: must be at least 1 second")]
    InvalidTimeout {
        /// The rejected value
        seconds: u64,
    },

    /// An interface exclude pattern is not a valid regex.
    #[error("Invalid interface pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The rejected pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
}
