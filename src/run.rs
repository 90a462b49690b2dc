//! Application execution logic.
//!
//! This module contains the one-shot `show` and `copy` commands and the
//! `watch` loop that keeps the address refreshed and reacts to user input.

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;

use local_ip::config::ValidatedConfig;
use local_ip::indicator::{
    Clipboard, CommandClipboard, CommandNotifier, CopyAction, CopyError, CopyOutcome, Indicator,
    Label, LogNotifier, Notifier, RefreshTask,
};
use local_ip::network::{
    CommandSource, InterfaceSource, ResolveError, ResolvedAddress, Resolver, SourceChain,
    SourceError,
};

/// Type alias for the application's data source.
type AppSource = SourceChain<CommandSource>;

/// Type alias for the application's copy action.
type AppCopyAction = CopyAction<CommandClipboard, AppNotifier>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Every data source failed.
    #[error("Failed to read interface data: {0}")]
    Source(#[source] SourceError),

    /// Interface data was read but nothing was eligible.
    #[error("No eligible local address found")]
    NoAddress,

    /// The clipboard command failed.
    #[error("Failed to copy address: {0}")]
    Copy(#[source] CopyError),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// Encoding the JSON report failed.
    #[error("Failed to encode report: {0}")]
    Report(#[source] serde_json::Error),
}

impl RunError {
    /// Returns false for outcomes that are not failures worth an error log.
    ///
    /// Finding no eligible address is a normal state, reported as `No IP`.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !matches!(self, Self::NoAddress)
    }
}

impl From<ResolveError> for RunError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::DataSourceUnavailable(e) => Self::Source(e),
            ResolveError::NoAddressFound => Self::NoAddress,
        }
    }
}

/// Notification backend chosen by configuration.
#[derive(Debug)]
pub enum AppNotifier {
    /// Run the configured notification command.
    Command(CommandNotifier),
    /// Notifications disabled; only log.
    Disabled(LogNotifier),
}

impl Notifier for AppNotifier {
    async fn notify(&self, summary: &str, body: &str) -> Result<(), CopyError> {
        match self {
            Self::Command(notifier) => notifier.notify(summary, body).await,
            Self::Disabled(notifier) => notifier.notify(summary, body).await,
        }
    }
}

/// A command typed on stdin while watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Copy the displayed address (`c`, `copy`, or an empty line).
    Copy,
    /// Refresh now (`r`, `refresh`).
    Refresh,
    /// Stop watching (`q`, `quit`).
    Quit,
}

/// Parses one line of user input. Returns `None` for unknown commands.
pub fn parse_command(line: &str) -> Option<UserCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "c" | "copy" => Some(UserCommand::Copy),
        "r" | "refresh" => Some(UserCommand::Refresh),
        "q" | "quit" | "exit" => Some(UserCommand::Quit),
        _ => None,
    }
}

/// JSON report printed by `show --json`.
#[derive(Debug, Serialize)]
struct Report<'a> {
    label: String,
    address: Option<&'a ResolvedAddress>,
    error: Option<String>,
}

/// Renders a resolution result as a JSON report.
fn render_report(result: &Result<ResolvedAddress, ResolveError>) -> Result<String, RunError> {
    let report = Report {
        label: Label::from_result(result).to_string(),
        address: result.as_ref().ok(),
        error: result.as_ref().err().map(ToString::to_string),
    };

    serde_json::to_string(&report).map_err(RunError::Report)
}

/// Creates the data source chain from configuration.
fn build_source(config: &ValidatedConfig) -> AppSource {
    SourceChain::new(
        config
            .sources
            .iter()
            .map(|&kind| CommandSource::for_kind(kind, config.timeout))
            .collect(),
    )
}

/// Creates the copy action from configuration.
fn build_copy_action(config: &ValidatedConfig) -> AppCopyAction {
    let notifier = config.notify.clone().map_or(
        AppNotifier::Disabled(LogNotifier),
        |command| AppNotifier::Command(CommandNotifier::new(command)),
    );

    CopyAction::new(CommandClipboard::new(config.clipboard.clone()), notifier)
}

fn write_line(out: &mut impl Write, text: impl std::fmt::Display) -> Result<(), RunError> {
    writeln!(out, "{text}").map_err(RunError::Output)
}

/// Resolves once and prints the label (or a JSON report) to stdout.
///
/// # Errors
///
/// Returns an error if resolution fails or finds nothing; the label is
/// printed either way.
pub async fn show(config: &ValidatedConfig, json: bool) -> Result<(), RunError> {
    show_with(&build_source(config), json, &mut std::io::stdout().lock()).await
}

async fn show_with<S: InterfaceSource>(
    source: &S,
    json: bool,
    out: &mut impl Write,
) -> Result<(), RunError> {
    let result = Resolver::new().resolve_from(source).await;

    if json {
        write_line(out, render_report(&result)?)?;
    } else {
        write_line(out, Label::from_result(&result))?;
    }

    result.map(|_| ()).map_err(RunError::from)
}

/// Resolves once and copies the address to the clipboard.
///
/// # Errors
///
/// Returns an error if resolution fails, finds nothing, or the clipboard
/// command fails.
pub async fn copy(config: &ValidatedConfig) -> Result<(), RunError> {
    copy_with(
        &build_source(config),
        &build_copy_action(config),
        &mut std::io::stdout().lock(),
    )
    .await
}

async fn copy_with<S, C, N>(
    source: &S,
    action: &CopyAction<C, N>,
    out: &mut impl Write,
) -> Result<(), RunError>
where
    S: InterfaceSource,
    C: Clipboard,
    N: Notifier,
{
    let result = Resolver::new().resolve_from(source).await;
    let label = Label::from_result(&result);

    match action.activate(&label).await.map_err(RunError::Copy)? {
        CopyOutcome::Copied(address) => write_line(out, address),
        CopyOutcome::NothingToCopy => {
            write_line(out, &label)?;
            result.map(|_| ()).map_err(RunError::from)
        }
    }
}

/// Keeps the address refreshed until quit or a shutdown signal.
///
/// Label changes are printed to stdout, one per line. Commands are read
/// from stdin (see [`parse_command`]); when stdin closes, refreshing
/// continues without input.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Real system commands and an interactive stdin
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn watch(config: ValidatedConfig) -> Result<(), RunError> {
    let indicator = Arc::new(Indicator::new(build_source(&config)));
    let action = build_copy_action(&config);
    let mut labels = indicator.subscribe();
    let mut task = RefreshTask::spawn(Arc::clone(&indicator), config.interval);

    let mut commands = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    let mut accepting_input = true;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tracing::info!(
        "Watching local address (interval: {}s). Commands: [c]opy, [r]efresh, [q]uit",
        config.interval.as_secs()
    );

    let outcome = loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                break Ok(());
            }

            changed = labels.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let label = labels.borrow_and_update().clone();
                if let Err(e) = write_line(&mut std::io::stdout().lock(), label) {
                    break Err(e);
                }
            }

            line = commands.next(), if accepting_input => match line {
                Some(Ok(line)) => match parse_command(&line) {
                    Some(UserCommand::Copy) => copy_current(&action, &indicator).await,
                    Some(UserCommand::Refresh) => task.request_refresh(),
                    Some(UserCommand::Quit) => break Ok(()),
                    None => tracing::warn!("Unknown command '{}'", line.trim()),
                },
                Some(Err(e)) => {
                    tracing::warn!("Failed to read stdin, ignoring further input: {e}");
                    accepting_input = false;
                }
                None => {
                    tracing::debug!("stdin closed, ignoring further input");
                    accepting_input = false;
                }
            },
        }
    };

    task.cancel();
    outcome
}

/// Runs the copy action against the indicator's current label.
async fn copy_current<S, C, N>(action: &CopyAction<C, N>, indicator: &Indicator<S>)
where
    S: InterfaceSource,
    C: Clipboard,
    N: Notifier,
{
    let label = indicator.label();

    match action.activate(&label).await {
        Ok(CopyOutcome::Copied(_)) => {}
        Ok(CopyOutcome::NothingToCopy) => {
            tracing::info!("Nothing to copy ({label})");
        }
        Err(e) => {
            tracing::error!("Copy failed: {e}");
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
