//! Tests for the interface exclusion module.

use super::InterfaceRecord;
use super::filter::*;

fn interface(name: &str) -> InterfaceRecord {
    InterfaceRecord::new(name, vec![])
}

// ============================================================================
// NameMatcher Tests
// ============================================================================

mod name_matcher {
    use super::*;

    #[test]
    fn exact_requires_full_name() {
        let matcher = NameMatcher::Exact("lo");
        assert!(matcher.is_match("lo"));
        assert!(!matcher.is_match("lo0"));
        assert!(!matcher.is_match("l"));
    }

    #[test]
    fn prefix_matches_start_only() {
        let matcher = NameMatcher::Prefix("veth");
        assert!(matcher.is_match("veth"));
        assert!(matcher.is_match("veth123"));
        assert!(!matcher.is_match("myveth"));
    }
}

// ============================================================================
// ExclusionPolicy Tests
// ============================================================================

mod exclusion_policy {
    use super::*;

    #[test]
    fn excludes_fixed_set() {
        let policy = ExclusionPolicy::standard();

        for name in ["lo", "docker0", "veth123", "br-abc", "virbr0", "virbr0-nic"] {
            assert!(policy.is_excluded(name), "{name} should be excluded");
        }
    }

    #[test]
    fn keeps_physical_and_look_alike_names() {
        let policy = ExclusionPolicy::standard();

        for name in ["eth0", "wlan0", "enp3s0", "lo0", "loopback", "br0", "bridge0", "tun0"] {
            assert!(!policy.is_excluded(name), "{name} should be kept");
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        let policy = ExclusionPolicy::standard();
        assert!(!policy.is_excluded("Docker0"));
        assert!(!policy.is_excluded("LO"));
    }

    #[test]
    fn filter_matches_means_eligible() {
        let policy = ExclusionPolicy::standard();
        assert!(policy.matches(&interface("eth0")));
        assert!(!policy.matches(&interface("docker0")));
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(ExclusionPolicy::default(), ExclusionPolicy::standard());
        assert_eq!(ExclusionPolicy::standard().matchers().len(), 5);
    }

    #[test]
    fn works_through_reference() {
        let policy = ExclusionPolicy::standard();
        let by_ref: &dyn InterfaceFilter = &policy;
        assert!(!(&by_ref).matches(&interface("lo")));
    }
}
