//! The `ipscout.toml` file format.
//!
//! Three optional tables: `[public_ip]`, `[local]` and `[transport]`.
//! Unknown tables or keys are rejected so typos surface as errors.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// A parsed config file. Anything left out falls back to CLI or defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub public_ip: PublicIpSection,

    #[serde(default)]
    pub local: LocalSection,

    #[serde(default)]
    pub transport: TransportSection,
}

/// `[public_ip]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicIpSection {
    /// Echo service URL
    pub url: Option<String>,

    /// Timeout in seconds
    pub timeout: Option<u64>,

    /// Whether to run the lookup at all (default: true)
    pub enabled: Option<bool>,
}

/// `[local]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalSection {
    /// Regex patterns for interfaces to skip
    #[serde(default)]
    pub exclude_interfaces: Vec<String>,
}

/// `[transport]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportSection {
    /// Bind address to report
    pub bind_address: Option<String>,
}

impl TomlConfig {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileRead`] when the file is missing or unreadable,
    /// [`ConfigError::TomlParse`] when its contents are rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(source) => Err(ConfigError::FileRead {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// # Errors
    ///
    /// [`ConfigError::TomlParse`] for malformed TOML, unknown keys or
    /// mistyped values.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Starter file written by `ipscout init`.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ipscout configuration
# Command-line flags override every value in this file.

[public_ip]
# Echo service returning the caller's address as plain text
url = "https://api.ipify.org"

# Timeout in seconds for the whole request (default: 5)
timeout = 5

# Set to false to report the local address only
# (--local-only also disables it)
# enabled = true

[local]
# Regex patterns for interfaces to skip, in addition to loopback,
# tunnel and inactive interfaces
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude_interfaces = ["^docker", "^vEthernet"]

[transport]
# Bind address of the local listening service, shown in the report
# bind_address = "0.0.0.0"
"#
    .to_string()
}
