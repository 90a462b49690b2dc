//! Interface exclusion by name.
//!
//! # Design
//!
//! - **Pure Matcher**: [`NameMatcher`] only answers "does this name match?"
//!   without exclusion semantics.
//! - **Policy**: [`ExclusionPolicy`] rejects an interface when ANY matcher
//!   matches its name. The standard policy is fixed and not configurable.

use super::InterfaceRecord;

/// Trait for deciding whether an interface takes part in address selection.
pub trait InterfaceFilter: Send + Sync {
    /// Returns `true` if the interface should be considered, `false` to skip it.
    fn matches(&self, interface: &InterfaceRecord) -> bool;
}

/// Matches interface names exactly or by prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatcher {
    /// Name must equal the value.
    Exact(&'static str),
    /// Name must start with the value.
    Prefix(&'static str),
}

impl NameMatcher {
    /// Returns true if `name` matches.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => name == *expected,
            Self::Prefix(prefix) => name.starts_with(prefix),
        }
    }
}

/// Loopback, container, and virtual bridge interfaces never selected.
const STANDARD_EXCLUSIONS: [NameMatcher; 5] = [
    NameMatcher::Exact("lo"),
    NameMatcher::Prefix("docker"),
    NameMatcher::Prefix("veth"),
    NameMatcher::Prefix("br-"),
    NameMatcher::Prefix("virbr"),
];

/// Name-based interface exclusion.
///
/// # Examples
///
/// ```
/// use local_ip::network::filter::{ExclusionPolicy, InterfaceFilter};
/// use local_ip::network::InterfaceRecord;
///
/// let policy = ExclusionPolicy::standard();
///
/// assert!(policy.matches(&InterfaceRecord::new("eth0", vec![])));
/// assert!(!policy.matches(&InterfaceRecord::new("docker0", vec![])));
/// assert!(!policy.matches(&InterfaceRecord::new("lo", vec![])));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    excluded: Vec<NameMatcher>,
}

impl ExclusionPolicy {
    /// The fixed policy: `lo` exactly, and names starting with
    /// `docker`, `veth`, `br-`, or `virbr`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            excluded: STANDARD_EXCLUSIONS.to_vec(),
        }
    }

    /// Returns true if an interface with this name is never eligible.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|m| m.is_match(name))
    }

    /// Returns the matchers in this policy.
    #[must_use]
    pub fn matchers(&self) -> &[NameMatcher] {
        &self.excluded
    }
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl InterfaceFilter for ExclusionPolicy {
    fn matches(&self, interface: &InterfaceRecord) -> bool {
        !self.is_excluded(interface.name())
    }
}

// Blanket implementation: any &T where T: InterfaceFilter also implements InterfaceFilter
impl<T: InterfaceFilter + ?Sized> InterfaceFilter for &T {
    fn matches(&self, interface: &InterfaceRecord) -> bool {
        (*self).matches(interface)
    }
}
