//! User-defined trusted proxy patterns.
//!
//! # Responsibilities
//! - Compile the configured pattern list into a registry
//! - Skip malformed patterns with a warning, never abort startup
//! - Publish the registry atomically so request tasks read it lock-free
//!
//! # Design Decisions
//! - Patterns are unanchored, matching the original regexp semantics;
//!   operators anchor with `\A...\z` when they mean the whole string
//! - The registry is immutable; hot reload stores a fresh instance into
//!   the shared `ArcSwap` handle

use std::sync::Arc;

use arc_swap::ArcSwap;
use regex::Regex;

/// Handle shared between the request path and the reload path.
pub type SharedTrustRegistry = Arc<ArcSwap<TrustRegistry>>;

/// An ordered set of compiled trusted-proxy patterns.
#[derive(Debug, Default)]
pub struct TrustRegistry {
    patterns: Vec<Regex>,
}

impl TrustRegistry {
    /// A registry with no patterns; only builtin ranges and hostname
    /// markers will classify as trusted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from a comma-separated pattern list.
    ///
    /// Elements are trimmed; empty elements are skipped. An element that
    /// fails to compile is dropped with a warning. Order is preserved and
    /// duplicates are kept.
    pub fn from_patterns(raw: &str) -> Self {
        let mut patterns = Vec::new();
        for element in raw.split(',') {
            let pattern = element.trim();
            if pattern.is_empty() {
                continue;
            }
            match Regex::new(pattern) {
                Ok(compiled) => {
                    tracing::info!(pattern, "Trusted proxy pattern added");
                    patterns.push(compiled);
                }
                Err(error) => {
                    tracing::warn!(pattern, %error, "Trusted proxy pattern failed to compile, skipping");
                }
            }
        }
        Self { patterns }
    }

    /// True if any compiled pattern matches the candidate.
    pub fn matches_any(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(candidate))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Build the process-wide registry handle from the configured pattern list.
pub fn shared_registry(raw: &str) -> SharedTrustRegistry {
    Arc::new(ArcSwap::from_pointee(TrustRegistry::from_patterns(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_trimmed_elements_and_skips_empties() {
        let registry = TrustRegistry::from_patterns("  10\\..* , , ,192\\.168\\..*  ");
        assert_eq!(registry.len(), 2);
        assert!(registry.matches_any("10.0.0.1"));
        assert!(registry.matches_any("192.168.4.4"));
        assert!(!registry.matches_any("172.16.0.1"));
    }

    #[test]
    fn malformed_pattern_is_dropped_not_fatal() {
        let registry = TrustRegistry::from_patterns("((broken,100\\..*");
        assert_eq!(registry.len(), 1);
        assert!(registry.matches_any("100.1.2.3"));
    }

    #[test]
    fn empty_list_yields_empty_registry() {
        assert!(TrustRegistry::from_patterns("").is_empty());
        assert!(TrustRegistry::from_patterns(" , ,").is_empty());
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let registry = TrustRegistry::from_patterns("a+,a+");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn match_is_unanchored_unless_pattern_anchors() {
        let registry = TrustRegistry::from_patterns("100\\.0");
        assert!(registry.matches_any("1100.0.0.1"));

        let anchored = TrustRegistry::from_patterns(r"\A100\.0\.0\.1\z");
        assert!(anchored.matches_any("100.0.0.1"));
        assert!(!anchored.matches_any("1100.0.0.1"));
    }

    #[test]
    fn reload_publishes_a_fresh_registry() {
        let shared = shared_registry("10\\..*");
        assert!(shared.load().matches_any("10.0.0.1"));

        shared.store(Arc::new(TrustRegistry::from_patterns("172\\..*")));
        assert!(!shared.load().matches_any("10.0.0.1"));
        assert!(shared.load().matches_any("172.16.0.1"));
    }
}
