//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid duration value (zero or out of range).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Unknown data source name.
    #[error("Invalid source '{value}': expected ip or hostname")]
    InvalidSource {
        /// The invalid value provided
        value: String,
    },

    /// The source list is empty.
    #[error("No data source configured. {hint}")]
    NoSources {
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// A command option is empty.
    #[error("Empty command for {field}. {hint}")]
    EmptyCommand {
        /// Name of the field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },
}

/// Well-known field names used in configuration errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The refresh interval field.
    pub const INTERVAL: &str = "interval";
    /// The command timeout field.
    pub const TIMEOUT: &str = "timeout_ms";
    /// The clipboard command field.
    pub const CLIPBOARD_COMMAND: &str = "clipboard_command";
    /// The notification command field.
    pub const NOTIFY_COMMAND: &str = "notify_command";
}

impl ConfigError {
    /// Creates an `InvalidDuration` error for a zero value.
    #[must_use]
    pub fn zero_duration(field: &'static str) -> Self {
        Self::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        }
    }

    /// Creates an `InvalidDuration` error for a value above `max`.
    #[must_use]
    pub fn duration_too_large(field: &'static str, max: u64) -> Self {
        Self::InvalidDuration {
            field,
            reason: format!("must be at most {max}"),
        }
    }
}
