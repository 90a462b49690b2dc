//! Display states of the indicator label.

use std::fmt;

use crate::network::{ResolveError, ResolvedAddress};

/// Text shown before the first resolution completes.
pub const LOADING_TEXT: &str = "Loading...";

/// Text shown when resolution succeeded but nothing was eligible.
pub const NO_ADDRESS_TEXT: &str = "No IP";

/// Text shown when the interface data could not be read.
pub const ERROR_TEXT: &str = "Error";

/// What the indicator currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// No resolution has completed yet.
    Loading,
    /// An address was resolved.
    Address(ResolvedAddress),
    /// No eligible address was found.
    NoAddress,
    /// The data source failed.
    Error,
}

impl Label {
    /// Maps a resolution result to its display state.
    #[must_use]
    pub fn from_result(result: &Result<ResolvedAddress, ResolveError>) -> Self {
        match result {
            Ok(address) => Self::Address(address.clone()),
            Err(ResolveError::NoAddressFound) => Self::NoAddress,
            Err(ResolveError::DataSourceUnavailable(_)) => Self::Error,
        }
    }

    /// Returns the resolved address, if any.
    #[must_use]
    pub const fn address(&self) -> Option<&ResolvedAddress> {
        match self {
            Self::Address(address) => Some(address),
            Self::Loading | Self::NoAddress | Self::Error => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str(LOADING_TEXT),
            Self::Address(address) => f.write_str(&address.value),
            Self::NoAddress => f.write_str(NO_ADDRESS_TEXT),
            Self::Error => f.write_str(ERROR_TEXT),
        }
    }
}
