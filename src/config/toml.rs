//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Refresh configuration section
    #[serde(default)]
    pub refresh: RefreshSection,

    /// Data source configuration section
    #[serde(default)]
    pub source: SourceSection,

    /// Copy action configuration section
    #[serde(default)]
    pub copy: CopySection,
}

/// Refresh configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshSection {
    /// Refresh interval in seconds
    pub interval: Option<u64>,
}

/// Data source configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    /// Source names in the order they are tried
    pub order: Option<Vec<String>>,

    /// Timeout for each system command in milliseconds
    pub timeout_ms: Option<u64>,
}

/// Copy action configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopySection {
    /// Clipboard command as program followed by arguments
    pub clipboard_command: Option<Vec<String>>,

    /// Notification command as program followed by arguments
    pub notify_command: Option<Vec<String>>,

    /// Whether to show a notification after copying
    pub notify: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# local-ip Configuration File
# Default location: <config dir>/local-ip/config.toml

[refresh]
# Refresh interval in seconds (default: 10)
interval = 10

[source]
# Data sources, tried in order until one succeeds
# Accepted values: "ip" (ip -o addr show scope global), "hostname" (hostname -I)
# Note: CLI --source flags REPLACE this list entirely (not merged)
order = ["ip", "hostname"]

# Timeout for each system command in milliseconds (default: 2000)
# timeout_ms = 2000

[copy]
# Clipboard command; the address is written to its stdin (default: ["wl-copy"])
# clipboard_command = ["xclip", "-selection", "clipboard"]

# Notification command; called with summary and body (default: ["notify-send"])
# notify_command = ["notify-send"]

# Show a notification after copying (default: true)
# notify = true
"#
    .to_string()
}
