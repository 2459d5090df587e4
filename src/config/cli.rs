//! Command-line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// ipscout: local and public IP address discovery
///
/// Reports the host's local IPv4 address, an optional transport bind
/// address, and the public (WAN) address as seen by an echo service.
#[derive(Debug, Parser)]
#[command(name = "ipscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Public IP echo service URL
    #[arg(long)]
    pub url: Option<String>,

    /// Public lookup timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Transport bind address to include in the report
    #[arg(long = "bind-address", value_name = "ADDR")]
    pub bind_address: Option<String>,

    /// Skip interfaces whose name matches PATTERN (repeatable; replaces the file's list)
    #[arg(long = "exclude-interface", value_name = "PATTERN")]
    pub exclude_interfaces: Vec<String>,

    /// Skip the public IP lookup
    #[arg(long = "local-only")]
    pub local_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Read settings from this TOML file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Log at DEBUG level (RUST_LOG still wins)
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands. Without one, ipscout resolves and prints the report.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a commented starter config
    Init {
        /// Where to write it
        #[arg(long, short, default_value = super::defaults::CONFIG_PATH)]
        output: PathBuf,
    },
}

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One labelled line per field
    #[default]
    Text,
    /// A single JSON object
    Json,
}

impl Cli {
    /// Parses `std::env::args`, exiting with usage on error.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses an explicit argument list; the first item is the program name.
    pub fn parse_from_iter<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(args)
    }

    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
