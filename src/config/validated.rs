//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::indicator::CommandLine;
use crate::network::SourceKind;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config,
/// or [`ValidatedConfig::load`] to also locate and read the config file.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Refresh interval
    pub interval: Duration,

    /// Timeout applied to every system command
    pub timeout: Duration,

    /// Data sources in the order they are tried (non-empty, no duplicates)
    pub sources: Vec<SourceKind>,

    /// Command receiving copied text on stdin
    pub clipboard: CommandLine,

    /// Notification command; `None` when notifications are disabled
    pub notify: Option<CommandLine>,

    /// Verbose logging enabled
    pub verbose: bool,

    /// Config file that was loaded, if any
    pub config_path: Option<PathBuf>,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources = self
            .sources
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ");
        let notify = self.notify.as_ref().map_or("disabled", CommandLine::program);
        let config = self
            .config_path
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ interval: {}s, sources: [{sources}], timeout: {}ms, clipboard: {}, \
             notify: {notify}, config: {config} }}",
            self.interval.as_secs(),
            self.timeout.as_millis(),
            self.clipboard.program(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The interval or timeout is zero, or the interval exceeds one day
    /// - A source name is unknown or the source list is empty
    /// - The clipboard or notification command is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let interval = Self::resolve_interval(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let sources = Self::resolve_sources(cli, toml)?;
        let clipboard = Self::resolve_clipboard(cli, toml, timeout)?;
        let notify = Self::resolve_notify(cli, toml, timeout)?;

        Ok(Self {
            interval,
            timeout,
            sources,
            clipboard,
            notify,
            verbose: cli.verbose,
            config_path: None,
        })
    }

    /// Loads and merges configuration from CLI and the config file.
    ///
    /// Uses `cli.config` if set, otherwise `<config dir>/local-ip/config.toml`
    /// when that file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with_fallback(cli, default_config_path())
    }

    /// Like [`load`](Self::load), with an explicit fallback path.
    ///
    /// The fallback is only read when it exists; an explicit `--config`
    /// path must exist.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_fallback(cli: &Cli, fallback: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| fallback.filter(|p| p.is_file()));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        let mut config = Self::from_raw(cli, toml.as_ref())?;
        config.config_path = path;
        Ok(config)
    }

    fn resolve_interval(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .interval
            .or_else(|| toml.and_then(|t| t.refresh.interval))
            .unwrap_or(defaults::INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::zero_duration(field::INTERVAL));
        }
        if seconds > defaults::MAX_INTERVAL_SECS {
            return Err(ConfigError::duration_too_large(
                field::INTERVAL,
                defaults::MAX_INTERVAL_SECS,
            ));
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let millis = cli
            .timeout_ms
            .or_else(|| toml.and_then(|t| t.source.timeout_ms))
            .unwrap_or(defaults::COMMAND_TIMEOUT_MS);

        if millis == 0 {
            return Err(ConfigError::zero_duration(field::TIMEOUT));
        }

        Ok(Duration::from_millis(millis))
    }

    fn resolve_sources(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<SourceKind>, ConfigError> {
        // CLI sources replace the TOML list entirely
        let requested: Vec<SourceKind> = if cli.sources.is_empty() {
            match toml.and_then(|t| t.source.order.as_ref()) {
                Some(order) => order
                    .iter()
                    .map(|name| {
                        SourceKind::from_name(name).ok_or_else(|| ConfigError::InvalidSource {
                            value: name.clone(),
                        })
                    })
                    .collect::<Result<_, _>>()?,
                None => defaults::SOURCES.to_vec(),
            }
        } else {
            cli.sources.iter().copied().map(SourceKind::from).collect()
        };

        let mut sources = Vec::with_capacity(requested.len());
        for kind in requested {
            if !sources.contains(&kind) {
                sources.push(kind);
            }
        }

        if sources.is_empty() {
            return Err(ConfigError::NoSources {
                hint: "Use --source or set source.order in config file",
            });
        }

        Ok(sources)
    }

    fn resolve_clipboard(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        timeout: Duration,
    ) -> Result<CommandLine, ConfigError> {
        let parts = cli
            .clipboard_command
            .as_deref()
            .map(split_command)
            .or_else(|| toml.and_then(|t| t.copy.clipboard_command.clone()))
            .unwrap_or_else(|| vec![defaults::CLIPBOARD_COMMAND.to_string()]);

        CommandLine::from_parts(&parts, timeout).ok_or(ConfigError::EmptyCommand {
            field: field::CLIPBOARD_COMMAND,
            hint: "Use --clipboard-command or set copy.clipboard_command in config file",
        })
    }

    fn resolve_notify(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        timeout: Duration,
    ) -> Result<Option<CommandLine>, ConfigError> {
        // Either side can disable notifications; neither can force them back on
        let disabled = cli.no_notify || toml.and_then(|t| t.copy.notify) == Some(false);
        if disabled {
            return Ok(None);
        }

        let parts = cli
            .notify_command
            .as_deref()
            .map(split_command)
            .or_else(|| toml.and_then(|t| t.copy.notify_command.clone()))
            .unwrap_or_else(|| vec![defaults::NOTIFY_COMMAND.to_string()]);

        CommandLine::from_parts(&parts, timeout)
            .map(Some)
            .ok_or(ConfigError::EmptyCommand {
                field: field::NOTIFY_COMMAND,
                hint: "Use --notify-command, --no-notify or set copy.notify_command in config file",
            })
    }
}

/// Returns `<config dir>/local-ip/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::CONFIG_FILE_NAME)
    })
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}
