//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::network::SourceKind;

/// Default refresh interval in seconds.
pub const INTERVAL_SECS: u64 = 10;

/// Largest accepted refresh interval in seconds (one day).
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// Default timeout for system commands in milliseconds.
pub const COMMAND_TIMEOUT_MS: u64 = 2000;

/// Default data source order.
pub const SOURCES: [SourceKind; 2] = [SourceKind::IpAddr, SourceKind::Hostname];

/// Default clipboard command.
pub const CLIPBOARD_COMMAND: &str = "wl-copy";

/// Default notification command.
pub const NOTIFY_COMMAND: &str = "notify-send";

/// Directory under the user config dir holding the config file.
pub const CONFIG_DIR_NAME: &str = "local-ip";

/// Name of the config file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default refresh interval as Duration.
#[must_use]
pub const fn interval() -> Duration {
    Duration::from_secs(INTERVAL_SECS)
}

/// Default command timeout as Duration.
#[must_use]
pub const fn command_timeout() -> Duration {
    Duration::from_millis(COMMAND_TIMEOUT_MS)
}
