//! The address indicator.
//!
//! Glue between the resolver and the user:
//!
//! - [`Indicator`] runs resolutions and publishes the current [`Label`]
//! - [`RefreshTask`] refreshes it on a fixed interval until cancelled
//! - [`CopyAction`] puts the displayed address on the clipboard and notifies

mod copy;
mod label;
mod panel;
mod scheduler;

pub use copy::{
    Clipboard, CommandClipboard, CommandLine, CommandNotifier, CopyAction, CopyError, CopyOutcome,
    LogNotifier, NOTIFICATION_SUMMARY, Notifier,
};
pub use label::{ERROR_TEXT, LOADING_TEXT, Label, NO_ADDRESS_TEXT};
pub use panel::Indicator;
pub use scheduler::{MAX_PERIOD, RefreshTask};
