//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::network::SourceKind;

/// local-ip: show the primary local IP address
///
/// Resolves the machine's primary local address from system networking
/// tools, keeps it refreshed and copies it to the clipboard on request.
#[derive(Debug, Parser)]
#[command(name = "local-ip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: watch)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Refresh interval in seconds
    #[arg(long, global = true)]
    pub interval: Option<u64>,

    /// Timeout for each system command in milliseconds
    #[arg(long = "timeout-ms", global = true)]
    pub timeout_ms: Option<u64>,

    /// Interface data source, tried in the given order (can be specified multiple times)
    #[arg(long = "source", value_enum, global = true)]
    pub sources: Vec<SourceArg>,

    /// Command that receives the copied text on stdin (e.g. "xclip -selection clipboard")
    #[arg(long = "clipboard-command", value_name = "CMD", global = true)]
    pub clipboard_command: Option<String>,

    /// Command called with summary and body to show a notification
    #[arg(long = "notify-command", value_name = "CMD", global = true)]
    pub notify_command: Option<String>,

    /// Do not show a notification after copying
    #[arg(long = "no-notify", global = true)]
    pub no_notify: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for local-ip
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Keep the address refreshed, print changes and accept commands on stdin
    Watch,

    /// Resolve once and print the address
    Show {
        /// Print a JSON report instead of the bare label
        #[arg(long)]
        json: bool,
    },

    /// Resolve once and copy the address to the clipboard
    Copy,

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "local-ip.toml")]
        output: PathBuf,
    },
}

/// Data source argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// `ip -o addr show scope global`
    #[value(name = "ip")]
    IpAddr,
    /// `hostname -I`
    #[value(name = "hostname")]
    Hostname,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::IpAddr => Self::IpAddr,
            SourceArg::Hostname => Self::Hostname,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the subcommand to run, defaulting to [`Command::Watch`].
    #[must_use]
    pub fn action(&self) -> Command {
        self.command.clone().unwrap_or(Command::Watch)
    }
}
