//! Periodic refresh scheduling.
//!
//! This module provides [`RefreshTask`], the owner of the background task
//! that refreshes an [`Indicator`] once at startup and then on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use super::Indicator;
use crate::network::InterfaceSource;

/// Longest period the loop waits between refreshes. Longer periods are clamped.
pub const MAX_PERIOD: Duration = Duration::from_secs(86_400);

/// Handle to a running refresh loop.
///
/// All resolutions for an indicator run inside this one task, so they never
/// overlap. Manual refresh requests are delivered to the task instead of
/// resolving on the caller's side.
///
/// # Cancellation
///
/// [`cancel`](Self::cancel) aborts the task exactly once; later calls are
/// no-ops. Dropping the handle cancels as well.
///
/// # Example
///
/// ```ignore
/// use local_ip::indicator::{Indicator, RefreshTask};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let indicator = Arc::new(Indicator::new(source));
/// let mut task = RefreshTask::spawn(Arc::clone(&indicator), Duration::from_secs(10));
///
/// // ... later
/// task.cancel();
/// ```
#[derive(Debug)]
pub struct RefreshTask {
    handle: Option<JoinHandle<()>>,
    trigger: Arc<Notify>,
    interval: Duration,
}

impl RefreshTask {
    /// Spawns the refresh loop on the current runtime.
    ///
    /// The first refresh happens immediately; subsequent ones every `period`,
    /// clamped to [`MAX_PERIOD`].
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero or if called outside a tokio runtime.
    #[must_use]
    pub fn spawn<S>(indicator: Arc<Indicator<S>>, period: Duration) -> Self
    where
        S: InterfaceSource + 'static,
    {
        let period = period.min(MAX_PERIOD);
        let trigger = Arc::new(Notify::new());
        let handle = tokio::spawn(refresh_loop(indicator, period, Arc::clone(&trigger)));

        tracing::debug!("Refresh task started (interval: {}s)", period.as_secs());

        Self {
            handle: Some(handle),
            trigger,
            interval: period,
        }
    }

    /// Asks the loop to refresh now instead of waiting for the next tick.
    ///
    /// Requests made while a refresh is running collapse into one.
    pub fn request_refresh(&self) {
        self.trigger.notify_one();
    }

    /// Stops the loop. Returns `true` only for the call that actually stopped it.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                tracing::debug!("Refresh task cancelled");
                true
            }
            None => false,
        }
    }

    /// Returns true while the loop is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Returns the configured refresh interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn refresh_loop<S: InterfaceSource>(
    indicator: Arc<Indicator<S>>,
    period: Duration,
    trigger: Arc<Notify>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = trigger.notified() => {
                tracing::debug!("Manual refresh requested");
                ticker.reset();
            }
        }

        indicator.refresh().await;
    }
}
