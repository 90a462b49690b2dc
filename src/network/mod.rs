//! Network layer for reading interface data and resolving the local address.
//!
//! This module provides types and traits for:
//! - Representing interfaces and addresses ([`InterfaceRecord`], [`AddressRecord`])
//! - Reading raw interface data ([`InterfaceSource`], [`SourceChain`])
//! - Command-backed sources ([`CommandSource`])
//! - Parsing raw snapshots ([`parse`])
//! - Interface exclusion ([`filter`])
//! - Selecting the single best address ([`Resolver`])

mod command;
pub mod filter;
pub mod parse;
mod record;
mod resolver;
mod source;

#[cfg(test)]
mod filter_tests;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use command::{CommandSource, SourceKind};
pub use record::{AddressFamily, AddressRecord, InterfaceRecord};
pub use resolver::{ResolveError, ResolvedAddress, Resolver};
pub use source::{InterfaceSource, RawSnapshot, SnapshotFormat, SourceChain, SourceError};
