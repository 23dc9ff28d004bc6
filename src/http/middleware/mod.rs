//! Request-path middleware.

pub mod firewall;

pub use firewall::firewall_middleware;
