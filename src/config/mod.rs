//! Configuration layer for local-ip.
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
//! 2. **TOML config file** - `--config`, or `<config dir>/local-ip/config.toml` if present
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The source list (`--source`, `source.order`) uses replace semantics: any
//! CLI `--source` discards the TOML list entirely.
//!
//! # Notifications
//!
//! `--no-notify` and `copy.notify = false` both disable notifications; a
//! `false` in either place wins.
//!
//! Commands given on the CLI are split on whitespace. Use the TOML array form
//! for arguments containing spaces.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, SourceArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, default_config_path, write_default_config};
