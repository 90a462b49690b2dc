//! Core network types for interface and address representation.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

/// Address family of a parsed or resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    /// IPv4 address.
    #[serde(rename = "IPv4")]
    V4,
    /// IPv6 address.
    #[serde(rename = "IPv6")]
    V6,
}

impl AddressFamily {
    /// Returns the family of the given address.
    #[must_use]
    pub const fn of(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// A single address entry parsed from source data.
///
/// The prefix length is not kept; the stored address is already normalized.
/// Records are immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRecord {
    address: IpAddr,
}

impl AddressRecord {
    /// Creates a record for the given address.
    #[must_use]
    pub const fn new(address: IpAddr) -> Self {
        Self { address }
    }

    /// Returns the parsed address.
    #[must_use]
    pub const fn address(&self) -> IpAddr {
        self.address
    }

    /// Returns the address family.
    #[must_use]
    pub const fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.address)
    }

    /// Returns the normalized textual form (lowercase, no prefix length).
    #[must_use]
    pub fn value(&self) -> String {
        self.address.to_string()
    }

    /// Returns true if this address must never be selected.
    ///
    /// Covers IPv4 `169.254.0.0/16`, IPv6 `fe80::/10` and the IPv6 loopback `::1`.
    #[must_use]
    pub const fn is_link_local(&self) -> bool {
        match self.address {
            IpAddr::V4(v4) => is_link_local_v4(v4),
            IpAddr::V6(v6) => is_link_local_v6(v6),
        }
    }
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

const fn is_link_local_v4(address: Ipv4Addr) -> bool {
    let octets = address.octets();
    octets[0] == 169 && octets[1] == 254
}

const fn is_link_local_v6(address: Ipv6Addr) -> bool {
    // fe80::/10 covers fe80 through febf in the first segment.
    (address.segments()[0] & 0xffc0) == 0xfe80 || address.is_loopback()
}

/// One network interface and the addresses reported under it, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    name: String,
    addresses: Vec<AddressRecord>,
}

impl InterfaceRecord {
    /// Creates a new interface record.
    #[must_use]
    pub fn new(name: impl Into<String>, addresses: Vec<AddressRecord>) -> Self {
        Self {
            name: name.into(),
            addresses,
        }
    }

    /// The interface name (e.g., "eth0", "docker0").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All addresses reported for this interface, in source order.
    #[must_use]
    pub fn addresses(&self) -> &[AddressRecord] {
        &self.addresses
    }

    /// Returns addresses that may be selected (link-local ones removed).
    pub fn candidates(&self) -> impl Iterator<Item = &AddressRecord> {
        self.addresses.iter().filter(|a| !a.is_link_local())
    }
}
