//! Copy action: put the current address on the clipboard and notify the user.

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::Label;
use crate::network::ResolvedAddress;

/// Summary line of the notification raised after copying.
pub const NOTIFICATION_SUMMARY: &str = "IP Address Copied";

/// Error type for clipboard and notification commands.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The command could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing the text to the command's input failed.
    #[error("Failed to write to '{program}': {source}")]
    Write {
        /// Program being written to
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The command ran but reported failure.
    #[error("'{program}' exited with {status}")]
    ExitStatus {
        /// Program that failed
        program: String,
        /// Rendered exit status
        status: String,
    },

    /// The command did not finish in time and was killed.
    #[error("'{program}' timed out after {}ms", timeout.as_millis())]
    Timeout {
        /// Program that timed out
        program: String,
        /// The configured timeout
        timeout: Duration,
    },
}

/// Destination for copied text.
pub trait Clipboard: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the clipboard could not be written.
    fn set_text(&self, text: &str) -> impl Future<Output = Result<(), CopyError>> + Send;
}

/// One-shot user notifications.
pub trait Notifier: Send + Sync {
    /// Shows a notification.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the notification could not be raised.
    fn notify(
        &self,
        summary: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), CopyError>> + Send;
}

/// A system command invocation with a timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandLine {
    /// Creates a command line from a program and arguments.
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }

    /// Builds a command line from `[program, args...]`.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn from_parts(parts: &[String], timeout: Duration) -> Option<Self> {
        let (program, args) = parts.split_first()?;
        Some(Self::new(program.clone(), args.iter().cloned(), timeout))
    }

    /// Returns the program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command with `extra` appended to its arguments and `input` on stdin.
    async fn run(&self, extra: &[&str], input: Option<&str>) -> Result<(), CopyError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(extra)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CopyError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        let program = self.program.clone();
        let finish = async move {
            if let (Some(text), Some(mut stdin)) = (input, child.stdin.take()) {
                stdin
                    .write_all(text.as_bytes())
                    .await
                    .map_err(|e| CopyError::Write {
                        program: program.clone(),
                        source: e,
                    })?;
                // Closing stdin lets the clipboard tool see end of input.
                drop(stdin);
            }
            child.wait().await.map_err(|e| CopyError::Spawn {
                program: program.clone(),
                source: e,
            })
        };

        let status = tokio::time::timeout(self.timeout, finish)
            .await
            .map_err(|_| CopyError::Timeout {
                program: self.program.clone(),
                timeout: self.timeout,
            })??;

        if status.success() {
            Ok(())
        } else {
            Err(CopyError::ExitStatus {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Clipboard backed by a command that reads the text from stdin (`wl-copy`, `xclip`).
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    command: CommandLine,
}

impl CommandClipboard {
    /// Creates a clipboard using the given command.
    #[must_use]
    pub const fn new(command: CommandLine) -> Self {
        Self { command }
    }

    /// Returns the command in use.
    #[must_use]
    pub const fn command(&self) -> &CommandLine {
        &self.command
    }
}

impl Clipboard for CommandClipboard {
    async fn set_text(&self, text: &str) -> Result<(), CopyError> {
        self.command.run(&[], Some(text)).await
    }
}

/// Notifier backed by a command taking summary and body as arguments (`notify-send`).
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    command: CommandLine,
}

impl CommandNotifier {
    /// Creates a notifier using the given command.
    #[must_use]
    pub const fn new(command: CommandLine) -> Self {
        Self { command }
    }
}

impl Notifier for CommandNotifier {
    async fn notify(&self, summary: &str, body: &str) -> Result<(), CopyError> {
        self.command.run(&[summary, body], None).await
    }
}

/// Notifier that only logs; used when notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify(&self, summary: &str, body: &str) -> Result<(), CopyError> {
        tracing::info!("{summary}: {body}");
        Ok(())
    }
}

/// Result of a copy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The address was placed on the clipboard.
    Copied(ResolvedAddress),
    /// No address was resolved; nothing happened.
    NothingToCopy,
}

/// Handles the user's copy action.
///
/// # Type Parameters
///
/// * `C` - The [`Clipboard`] to write to
/// * `N` - The [`Notifier`] to announce the copy with
#[derive(Debug)]
pub struct CopyAction<C, N> {
    clipboard: C,
    notifier: N,
}

impl<C: Clipboard, N: Notifier> CopyAction<C, N> {
    /// Creates a copy action.
    #[must_use]
    pub const fn new(clipboard: C, notifier: N) -> Self {
        Self {
            clipboard,
            notifier,
        }
    }

    /// Copies the address shown by `label`, if any.
    ///
    /// A failed notification is logged and does not fail the copy.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the clipboard could not be written.
    pub async fn activate(&self, label: &Label) -> Result<CopyOutcome, CopyError> {
        let Some(address) = label.address() else {
            tracing::debug!("Copy requested with nothing resolved ({label})");
            return Ok(CopyOutcome::NothingToCopy);
        };

        self.clipboard.set_text(&address.value).await?;
        tracing::info!("Copied {address} to clipboard");

        let body = format!("Copied {address} to clipboard");
        if let Err(e) = self.notifier.notify(NOTIFICATION_SUMMARY, &body).await {
            tracing::warn!("Failed to show notification: {e}");
        }

        Ok(CopyOutcome::Copied(address.clone()))
    }

    /// Returns the clipboard.
    pub const fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Returns the notifier.
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
#[path = "copy_tests.rs"]
mod tests;
