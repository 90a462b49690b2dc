//! Selection of the single best local address.
//!
//! Selection policy, in order:
//!
//! 1. Interfaces rejected by the [`ExclusionPolicy`] are skipped entirely.
//! 2. Link-local addresses are never candidates.
//! 3. The first IPv4 candidate in source order wins.
//! 4. Otherwise the first IPv6 candidate in source order wins.
//!
//! No other ranking (route metric, link state, name) is applied, so when
//! several interfaces qualify the winner depends on the order in which the
//! data source lists them.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::filter::{ExclusionPolicy, InterfaceFilter};
use super::parse::parse_snapshot;
use super::{AddressFamily, AddressRecord, InterfaceRecord, InterfaceSource, RawSnapshot, SourceError};

/// The address chosen to represent this machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedAddress {
    /// Normalized address text (no prefix length, lowercase).
    pub value: String,
    /// Address family.
    pub family: AddressFamily,
    /// Interface the address was found on.
    pub interface: String,
}

impl ResolvedAddress {
    fn from_record(interface: &InterfaceRecord, record: &AddressRecord) -> Self {
        Self {
            value: record.value(),
            family: record.family(),
            interface: interface.name().to_string(),
        }
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Why no address could be resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The interface data could not be read.
    #[error("Interface data unavailable: {0}")]
    DataSourceUnavailable(#[from] SourceError),

    /// The data was read, but no eligible address survived filtering.
    #[error("No eligible address found")]
    NoAddressFound,
}

impl ResolveError {
    /// Returns true if this is a failure rather than an empty result.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::DataSourceUnavailable(_))
    }
}

/// Resolves a raw snapshot into a single [`ResolvedAddress`].
///
/// Holds no state between calls; the same snapshot always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    policy: ExclusionPolicy,
}

impl Resolver {
    /// Creates a resolver using the standard exclusion policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the best address from a snapshot.
    ///
    /// Malformed lines are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoAddressFound`] when no eligible candidate exists.
    pub fn resolve(&self, snapshot: &RawSnapshot) -> Result<ResolvedAddress, ResolveError> {
        let parsed = parse_snapshot(snapshot);

        for anomaly in &parsed.anomalies {
            tracing::debug!("Skipping unparsable data from '{}': {anomaly}", snapshot.origin);
        }

        self.select(&parsed.interfaces)
            .ok_or(ResolveError::NoAddressFound)
    }

    /// Reads from `source` and resolves the result.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DataSourceUnavailable`] when the source fails,
    /// or [`ResolveError::NoAddressFound`] when nothing is eligible.
    pub async fn resolve_from<S: InterfaceSource>(
        &self,
        source: &S,
    ) -> Result<ResolvedAddress, ResolveError> {
        let snapshot = source.fetch().await?;
        self.resolve(&snapshot)
    }

    /// Applies exclusion and family priority to parsed interfaces.
    #[must_use]
    pub fn select(&self, interfaces: &[InterfaceRecord]) -> Option<ResolvedAddress> {
        let mut first_v6 = None;

        let eligible = interfaces.iter().filter(|i| self.policy.matches(i));
        for interface in eligible {
            for record in interface.candidates() {
                match record.family() {
                    AddressFamily::V4 => {
                        return Some(ResolvedAddress::from_record(interface, record));
                    }
                    AddressFamily::V6 if first_v6.is_none() => {
                        first_v6 = Some(ResolvedAddress::from_record(interface, record));
                    }
                    AddressFamily::V6 => {}
                }
            }
        }

        first_v6
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
