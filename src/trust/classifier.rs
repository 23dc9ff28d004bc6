//! Trusted proxy predicate.
//!
//! Combines the user-defined pattern registry, the builtin address
//! ranges, and the hostname / unix-socket markers into a single check.

use std::net::IpAddr;

use crate::trust::ranges::in_builtin_trusted_range;
use crate::trust::registry::{SharedTrustRegistry, TrustRegistry};

/// Classifies forwarding-chain entries as trusted intermediaries.
#[derive(Clone)]
pub struct TrustClassifier {
    registry: SharedTrustRegistry,
}

impl TrustClassifier {
    pub fn new(registry: SharedTrustRegistry) -> Self {
        Self { registry }
    }

    /// True when the candidate is an intermediary this deployment trusts
    /// to prepend forwarding information.
    pub fn is_trusted_proxy(&self, candidate: &str) -> bool {
        let registry = self.registry.load();
        is_trusted_with(candidate, &registry)
    }
}

/// The classification itself, parameterized over a registry.
///
/// Check order, first match wins:
/// 1. user-defined patterns
/// 2. builtin trusted ranges, when the candidate parses as an IP
/// 3. "localhost" (case-insensitive)
/// 4. "unix" (case-insensitive)
/// 5. "unix:" plus a non-empty suffix; bare "unix:" is not trusted
pub fn is_trusted_with(candidate: &str, registry: &TrustRegistry) -> bool {
    if registry.matches_any(candidate) {
        return true;
    }

    // Not parsing as an IP is not an error; hostname checks still apply.
    if let Ok(ip) = candidate.parse::<IpAddr>() {
        if in_builtin_trusted_range(ip) {
            return true;
        }
    }

    let normalized = candidate.to_ascii_lowercase();
    if normalized == "localhost" {
        return true;
    }
    if normalized == "unix" {
        return true;
    }
    if let Some(suffix) = normalized.strip_prefix("unix:") {
        if !suffix.is_empty() {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trusted(candidate: &str) -> bool {
        is_trusted_with(candidate, &TrustRegistry::empty())
    }

    #[test]
    fn untrusted_candidates() {
        let should_be_false = [
            "bleair",
            "",
            "104.28.124.69",
            "2a09:bac3:616f:1232::1d0:1c",
            "2a09:bac3:77cc:1250::1d3:80",
            "::0",
            "::2",
            "fbff:ffff:ffff:ffff:ffff:ffff",
            "fe00::",
            "9.255.255.255",
            "11.0.0.0",
            "172.15.0.0",
            "172.32.0.0",
            "192.169.0.0",
            "notlocalhost",
            "localhosttryingtotrickyou",
            "unix:",
        ];
        for candidate in should_be_false {
            assert!(!trusted(candidate), "expected untrusted: {candidate:?}");
        }
    }

    #[test]
    fn trusted_candidates() {
        let should_be_true = [
            // localhost IPv4 range 127.x.x.x
            "127.0.0.0",
            "127.0.0.1",
            "127.0.0.255",
            "127.255.255.255",
            // localhost IPv6
            "::1",
            // private IPv6 range fc00 .. fdff
            "fc00::",
            "fc00:bac3:616f:1232::1d0:1c",
            "fd00:ffff:ffff:ffff:ffff:ffff:ffff:ffff",
            "fdff::",
            "fdff:ffff:ffff:ffff:ffff:ffff:ffff:ffff",
            // private IPv4 range 10.x.x.x
            "10.0.0.0",
            "10.0.0.1",
            "10.0.0.255",
            "10.255.255.255",
            // private IPv4 range 172.16.0.0 .. 172.31.255.255
            "172.16.0.0",
            "172.18.21.123",
            "172.31.255.255",
            // private IPv4 range 192.168.x.x
            "192.168.0.0",
            "192.168.1.1",
            "192.168.255.255",
            // localhost hostname, and unix domain sockets
            "localhost",
            "LOCALHOST",
            "LoCaLhOsT",
            "unix",
            "unix:/path/to/socket",
        ];
        for candidate in should_be_true {
            assert!(trusted(candidate), "expected trusted: {candidate:?}");
        }
    }

    #[test]
    fn user_patterns_extend_the_builtin_ranges() {
        let registry = TrustRegistry::from_patterns(
            r"\A100(\.(25[0-5]|2[0-4][0-9]|[01]?[0-9]?[0-9])){3}\z,\A200\.100(\.(25[0-5]|2[0-4][0-9]|[01]?[0-9]?[0-9])){2}\z",
        );

        for candidate in [
            "100.0.0.0",
            "100.0.0.1",
            "100.0.0.255",
            "100.255.255.255",
            "200.100.255.255",
        ] {
            assert!(
                is_trusted_with(candidate, &registry),
                "expected trusted: {candidate:?}"
            );
        }

        // outside both the patterns and the builtin ranges
        for candidate in ["104.28.124.69", "101.0.0.1", "bleair", "unix:"] {
            assert!(
                !is_trusted_with(candidate, &registry),
                "expected untrusted: {candidate:?}"
            );
        }
    }

    #[test]
    fn classifier_observes_registry_swaps() {
        let shared = crate::trust::registry::shared_registry("");
        let classifier = TrustClassifier::new(shared.clone());
        assert!(!classifier.is_trusted_proxy("100.0.0.1"));

        shared.store(std::sync::Arc::new(TrustRegistry::from_patterns(r"\A100\.")));
        assert!(classifier.is_trusted_proxy("100.0.0.1"));
    }
}
