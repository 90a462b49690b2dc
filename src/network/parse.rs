//! Parsing raw snapshots into interface records.
//!
//! Two layouts of `ip addr show` are accepted:
//!
//! ```text
//! 2: eth0    inet 192.168.1.42/24 brd 192.168.1.255 scope global eth0\ ...
//! ```
//!
//! and the block layout, where an interface header is followed by indented
//! address lines:
//!
//! ```text
//! 2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 ...
//!     inet 192.168.1.42/24 brd 192.168.1.255 scope global eth0
//!     inet6 fe80::1/64 scope link
//! ```
//!
//! Lines that cannot be interpreted are reported as [`ParseAnomaly`] values
//! and never abort parsing of the remaining lines.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

use super::{AddressRecord, InterfaceRecord, RawSnapshot, SnapshotFormat};

/// Interface name used for addresses that carry no interface attribution.
pub const UNATTRIBUTED_INTERFACE: &str = "*";

/// Interface header: `<index>: <name>` followed by `:` (block layout) or
/// whitespace (one-line layout).
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):\s+([^\s:]+):?(?:\s|$)").expect("header pattern is valid")
});

/// IPv4 address token after the `inet` keyword, with optional prefix length.
static INET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\binet\s+(\S+)").expect("inet pattern is valid")
});

/// IPv6 address token after the `inet6` keyword, with optional prefix length.
static INET6: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\binet6\s+(\S+)").expect("inet6 pattern is valid")
});

/// A line (or token) that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAnomaly {
    /// 1-based line number within the snapshot.
    pub line_number: usize,
    /// The offending line, trimmed.
    pub line: String,
    /// Why the line was rejected.
    pub reason: AnomalyReason,
}

/// Reason a line was rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnomalyReason {
    /// An `inet`/`inet6` token that is not a valid address of that family.
    InvalidAddress(String),
    /// An address line appeared before any interface header.
    MissingInterface,
}

impl fmt::Display for ParseAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            AnomalyReason::InvalidAddress(token) => write!(
                f,
                "line {}: invalid address '{token}' in '{}'",
                self.line_number, self.line
            ),
            AnomalyReason::MissingInterface => write!(
                f,
                "line {}: address outside any interface in '{}'",
                self.line_number, self.line
            ),
        }
    }
}

/// Result of parsing a raw snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSnapshot {
    /// Interfaces in source order.
    pub interfaces: Vec<InterfaceRecord>,
    /// Lines that were skipped.
    pub anomalies: Vec<ParseAnomaly>,
}

/// Parses a raw snapshot according to its format.
#[must_use]
pub fn parse_snapshot(snapshot: &RawSnapshot) -> ParsedSnapshot {
    match snapshot.format {
        SnapshotFormat::IpAddr => parse_ip_addr(&snapshot.text),
        SnapshotFormat::AddressList => parse_address_list(&snapshot.text),
    }
}

/// Accumulates address lines into interface records, preserving source order.
#[derive(Default)]
struct Builder {
    interfaces: Vec<InterfaceRecord>,
    current: Option<(String, Vec<AddressRecord>)>,
    anomalies: Vec<ParseAnomaly>,
}

impl Builder {
    /// Switches to `name`, continuing the current record when the name repeats.
    fn enter(&mut self, name: &str) {
        if self.current.as_ref().is_some_and(|(n, _)| n == name) {
            return;
        }
        self.flush();
        self.current = Some((name.to_string(), Vec::new()));
    }

    fn flush(&mut self) {
        if let Some((name, addresses)) = self.current.take() {
            self.interfaces.push(InterfaceRecord::new(name, addresses));
        }
    }

    fn anomaly(&mut self, line_number: usize, line: &str, reason: AnomalyReason) {
        self.anomalies.push(ParseAnomaly {
            line_number,
            line: line.trim().to_string(),
            reason,
        });
    }

    fn finish(mut self) -> ParsedSnapshot {
        self.flush();
        ParsedSnapshot {
            interfaces: self.interfaces,
            anomalies: self.anomalies,
        }
    }
}

/// Parses `ip addr show` output (one-line or block layout).
#[must_use]
pub fn parse_ip_addr(text: &str) -> ParsedSnapshot {
    let mut builder = Builder::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        // Headers start at column 0; continuation lines are indented.
        let body = match HEADER.captures(line) {
            Some(caps) => {
                builder.enter(interface_name(&caps[2]));
                caps.get(0).map_or(line, |m| &line[m.end()..])
            }
            None => line,
        };

        let Some(address) = extract_address(body) else {
            continue;
        };

        match address {
            Ok(record) => match builder.current.as_mut() {
                Some((_, addresses)) => addresses.push(record),
                None => builder.anomaly(line_number, line, AnomalyReason::MissingInterface),
            },
            Err(token) => {
                builder.anomaly(line_number, line, AnomalyReason::InvalidAddress(token));
            }
        }
    }

    builder.finish()
}

/// Parses whitespace-separated addresses (`hostname -I`).
///
/// All addresses are attributed to [`UNATTRIBUTED_INTERFACE`].
#[must_use]
pub fn parse_address_list(text: &str) -> ParsedSnapshot {
    let mut builder = Builder::default();

    for (index, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            match parse_token(token) {
                Some(address) => {
                    builder.enter(UNATTRIBUTED_INTERFACE);
                    if let Some((_, addresses)) = builder.current.as_mut() {
                        addresses.push(AddressRecord::new(address));
                    }
                }
                None => builder.anomaly(
                    index + 1,
                    line,
                    AnomalyReason::InvalidAddress(token.to_string()),
                ),
            }
        }
    }

    builder.finish()
}

/// Strips the kernel peer suffix (`veth12@if4` → `veth12`).
fn interface_name(raw: &str) -> &str {
    raw.split_once('@').map_or(raw, |(name, _)| name)
}

/// Finds an address token in a line.
///
/// Returns `None` when the line carries no address keyword at all,
/// `Some(Err(token))` when the keyword is present but the token is invalid.
fn extract_address(line: &str) -> Option<Result<AddressRecord, String>> {
    if let Some(caps) = INET6.captures(line) {
        let token = &caps[1];
        return Some(
            strip_prefix_len(token)
                .to_ascii_lowercase()
                .parse::<Ipv6Addr>()
                .map(|a| AddressRecord::new(IpAddr::V6(a)))
                .map_err(|_| token.to_string()),
        );
    }

    let caps = INET.captures(line)?;
    let token = &caps[1];
    Some(
        strip_prefix_len(token)
            .parse::<Ipv4Addr>()
            .map(|a| AddressRecord::new(IpAddr::V4(a)))
            .map_err(|_| token.to_string()),
    )
}

fn parse_token(token: &str) -> Option<IpAddr> {
    strip_prefix_len(token).to_ascii_lowercase().parse().ok()
}

fn strip_prefix_len(token: &str) -> &str {
    token.split_once('/').map_or(token, |(address, _)| address)
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
