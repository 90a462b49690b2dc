//! The indicator: owns the data source and the last displayed label.

use tokio::sync::watch;

use super::Label;
use crate::network::{InterfaceSource, ResolvedAddress, Resolver};

/// Resolves addresses from a source and publishes the resulting [`Label`].
///
/// The label is only ever written with the resolver's return value, and
/// readers always see the result of the most recently completed resolution.
///
/// # Type Parameters
///
/// * `S` - The [`InterfaceSource`] to read interface data from
#[derive(Debug)]
pub struct Indicator<S> {
    source: S,
    resolver: Resolver,
    label: watch::Sender<Label>,
}

impl<S: InterfaceSource> Indicator<S> {
    /// Creates an indicator with the standard resolver.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_resolver(source, Resolver::new())
    }

    /// Creates an indicator with a custom resolver.
    #[must_use]
    pub fn with_resolver(source: S, resolver: Resolver) -> Self {
        Self {
            source,
            resolver,
            label: watch::Sender::new(Label::Loading),
        }
    }

    /// Runs one resolution and publishes its label.
    ///
    /// Never fails: source failures become [`Label::Error`].
    /// Subscribers are only woken when the label actually changes.
    pub async fn refresh(&self) -> Label {
        let result = self.resolver.resolve_from(&self.source).await;

        match &result {
            Ok(address) => tracing::debug!(
                "Resolved {address} ({}) on {}",
                address.family,
                address.interface
            ),
            Err(e) if e.is_failure() => tracing::warn!("Address resolution failed: {e}"),
            Err(e) => tracing::debug!("{e}"),
        }

        let label = Label::from_result(&result);
        let changed = self.label.send_if_modified(|current| {
            if *current == label {
                false
            } else {
                *current = label.clone();
                true
            }
        });

        if changed {
            tracing::info!("Address label is now: {label}");
        }

        label
    }

    /// Returns the current label.
    #[must_use]
    pub fn label(&self) -> Label {
        self.label.borrow().clone()
    }

    /// Returns the currently resolved address, if any.
    #[must_use]
    pub fn current_address(&self) -> Option<ResolvedAddress> {
        self.label.borrow().address().cloned()
    }

    /// Subscribes to label changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Label> {
        self.label.subscribe()
    }

    /// Returns the underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::test_fixtures::{ScriptedSource, exit_failure, ip_snapshot};

    const ETH0: &str = "2: eth0    inet 192.168.1.42/24 scope global eth0\n";
    const ETH0_NEW: &str = "2: eth0    inet 192.168.1.77/24 scope global eth0\n";

    #[test]
    fn starts_loading_without_address() {
        let indicator = Indicator::new(ScriptedSource::returning(&[ETH0]));

        assert_eq!(indicator.label(), Label::Loading);
        assert_eq!(indicator.current_address(), None);
        assert_eq!(indicator.source().calls(), 0);
    }

    #[tokio::test]
    async fn refresh_publishes_resolved_address() {
        let indicator = Indicator::new(ScriptedSource::returning(&[ETH0]));

        let label = indicator.refresh().await;

        assert_eq!(label.to_string(), "192.168.1.42");
        assert_eq!(indicator.label(), label);
        assert_eq!(
            indicator.current_address().map(|a| a.value),
            Some("192.168.1.42".to_string())
        );
    }

    #[tokio::test]
    async fn failure_clears_address_and_shows_error() {
        let indicator = Indicator::new(ScriptedSource::new(vec![
            Ok(ip_snapshot(ETH0)),
            Err(exit_failure()),
        ]));

        indicator.refresh().await;
        let label = indicator.refresh().await;

        assert_eq!(label, Label::Error);
        assert_eq!(indicator.current_address(), None);
    }

    #[tokio::test]
    async fn failing_source_leaves_loading_for_error() {
        let indicator = Indicator::new(ScriptedSource::failing());

        assert_eq!(indicator.refresh().await.to_string(), "Error");
        assert_eq!(indicator.current_address(), None);
    }

    #[tokio::test]
    async fn no_candidates_shows_no_ip() {
        let indicator = Indicator::new(ScriptedSource::returning(&[
            "3: docker0    inet 172.17.0.1/16 scope global docker0\n",
        ]));

        assert_eq!(indicator.refresh().await.to_string(), "No IP");
    }

    #[tokio::test]
    async fn subscribers_see_changes_only() {
        let indicator = Indicator::new(ScriptedSource::returning(&[ETH0, ETH0, ETH0_NEW]));
        let mut rx = indicator.subscribe();

        indicator.refresh().await;
        assert!(rx.has_changed().unwrap());
        let _ = rx.borrow_and_update();

        indicator.refresh().await;
        assert!(!rx.has_changed().unwrap());

        indicator.refresh().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().to_string(), "192.168.1.77");
    }
}
