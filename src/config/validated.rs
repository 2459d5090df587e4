//! The settings a run actually uses.
//!
//! Each value comes from the command line if given, else the config file,
//! else [`defaults`]. Nothing here is re-checked later.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::network::filter::NameRegexFilter;
use crate::public::ResolverConfig;

use super::cli::{Cli, OutputFormat};
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Merged and checked settings.
///
/// Built by [`ValidatedConfig::load`], or [`ValidatedConfig::from_raw`] when
/// the TOML is already in hand.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Public lookup service and timeout
    pub resolver: ResolverConfig,

    /// Additional interface name excludes for local selection
    pub exclude_interfaces: Vec<NameRegexFilter>,

    /// Transport bind address to report, if any
    pub bind_address: Option<String>,

    /// Whether to run the public lookup
    pub lookup_public: bool,

    /// Report output format
    pub format: OutputFormat,

    /// DEBUG-level logging
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ url: {}, timeout: {}s, lookup_public: {}, bind_address: {}, excludes: {} }}",
            self.resolver.public_ip_service_url,
            self.resolver.timeout.as_secs(),
            self.lookup_public,
            self.bind_address.as_deref().unwrap_or("none"),
            self.exclude_interfaces.len(),
        )
    }
}

impl ValidatedConfig {
    /// Merges `cli` over `toml` over the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidUrl`] or [`ConfigError::UnsupportedScheme`] for
    /// a bad service URL, [`ConfigError::InvalidTimeout`] for a zero timeout,
    /// and [`ConfigError::InvalidRegex`] for a bad interface pattern.
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let url = Self::service_url(cli, toml)?;
        let resolver = ResolverConfig::new(url, Self::timeout(cli, toml)?);
        let exclude_interfaces = Self::interface_excludes(cli, toml)?;

        // Flags only disable; either source turning the lookup off wins
        let enabled_in_toml = toml.and_then(|t| t.public_ip.enabled).unwrap_or(true);
        let lookup_public = !cli.local_only && enabled_in_toml;

        let bind_address = cli
            .bind_address
            .clone()
            .or_else(|| toml.and_then(|t| t.transport.bind_address.clone()));

        Ok(Self {
            resolver,
            exclude_interfaces,
            bind_address,
            lookup_public,
            format: cli.format,
            verbose: cli.verbose,
        })
    }

    /// Reads `--config` when given, then merges.
    ///
    /// # Errors
    ///
    /// File and parse errors from [`TomlConfig::load`], plus everything
    /// [`ValidatedConfig::from_raw`] rejects.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = cli.config.as_deref().map(TomlConfig::load).transpose()?;
        Self::from_raw(cli, toml.as_ref())
    }

    fn service_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let raw = match (&cli.url, toml.and_then(|t| t.public_ip.url.as_ref())) {
            (Some(flag), _) => flag.as_str(),
            (None, Some(file)) => file.as_str(),
            (None, None) => defaults::PUBLIC_IP_SERVICE_URL,
        };

        let parsed = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
            url: raw.to_owned(),
            source,
        })?;

        if matches!(parsed.scheme(), "http" | "https") {
            Ok(parsed)
        } else {
            Err(ConfigError::UnsupportedScheme {
                url: raw.to_owned(),
                scheme: parsed.scheme().to_owned(),
            })
        }
    }

    fn timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        match cli
            .timeout
            .or_else(|| toml.and_then(|t| t.public_ip.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS)
        {
            0 => Err(ConfigError::InvalidTimeout { seconds: 0 }),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    fn interface_excludes(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<NameRegexFilter>, ConfigError> {
        // CLI patterns replace TOML patterns entirely
        let patterns: &[String] = if cli.exclude_interfaces.is_empty() {
            toml.map_or(&[], |t| t.local.exclude_interfaces.as_slice())
        } else {
            &cli.exclude_interfaces
        };

        patterns
            .iter()
            .map(|pattern| {
                NameRegexFilter::new(pattern).map_err(|source| ConfigError::InvalidRegex {
                    pattern: pattern.to_owned(),
                    source,
                })
            })
            .collect()
    }
}

/// Writes the commented starter config used by `ipscout init`.
///
/// An existing file at `path` is overwritten.
///
/// # Errors
///
/// [`ConfigError::FileWrite`] if the write fails.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, super::toml::default_config_template()).map_err(|source| {
        ConfigError::FileWrite {
            path: path.to_owned(),
            source,
        }
    })
}
