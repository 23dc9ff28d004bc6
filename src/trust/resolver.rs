//! Client address resolution.
//!
//! # Responsibilities
//! - Walk the x-forwarded-for chain nearest-proxy-first
//! - Fall back to the transport peer address, stripping its port
//! - Encode the resolved address as a decimal integer for the evaluator
//!
//! # Design Decisions
//! - The first hop not classified as a trusted proxy wins; farther hops
//!   are never inspected. Only proxies this deployment trusts may prepend
//!   forwarding hops, so the chain is trusted transitively from the near
//!   end and no farther.

use std::net::{IpAddr, SocketAddr};

use crate::trust::classifier::TrustClassifier;
use crate::trust::ranges::normalize;

/// Resolve the originating client address for a request.
///
/// `chain` holds the x-forwarded-for header values in receipt order, one
/// entry per header occurrence; iteration is reversed so it proceeds from
/// the hop nearest this server toward the original client. When the chain
/// is empty or every hop is a trusted proxy, the direct peer address is
/// used instead, without its port.
pub fn resolve_client_addr(chain: &[String], peer: &str, classifier: &TrustClassifier) -> String {
    for hop in chain.iter().rev() {
        if !classifier.is_trusted_proxy(hop) {
            return hop.clone();
        }
    }
    strip_port(peer)
}

fn strip_port(peer: &str) -> String {
    match peer.parse::<SocketAddr>() {
        Ok(addr) => addr.ip().to_string(),
        Err(_) => {
            tracing::warn!(peer, "Peer address is not host:port, using it verbatim");
            peer.to_string()
        }
    }
}

/// Decimal rendering of the 16-byte normalized address, "0" when the
/// input does not parse as an IP address. IPv4 therefore encodes as the
/// v4-mapped IPv6 integer; the evaluator contract depends on this form.
pub fn ip_decimal_string(addr: &str) -> String {
    match addr.parse::<IpAddr>() {
        Ok(ip) => u128::from_be_bytes(normalize(ip)).to_string(),
        Err(_) => "0".to_string(),
    }
}
