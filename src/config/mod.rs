//! Configuration layer for ipscout.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! For interface exclude patterns, CLI patterns **replace** TOML patterns
//! entirely (not merged).
//!
//! # Disabling the Public Lookup
//!
//! `--local-only` and `public_ip.enabled = false` are OR-ed: either one
//! disables the lookup, and the CLI cannot re-enable what the file disabled.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, OutputFormat};
pub use error::ConfigError;
pub use toml::{
    LocalSection, PublicIpSection, TomlConfig, TransportSection, default_config_template,
};
pub use validated::{ValidatedConfig, write_default_config};
