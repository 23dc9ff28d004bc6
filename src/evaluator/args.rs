//! Evaluation request arguments.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Value};

/// The ordered tuple handed to the external evaluator.
///
/// Field order and types are the wire contract; neither side may change
/// them independently.
#[derive(Debug, Clone)]
pub struct EvaluationArgs {
    /// Resolved client address.
    pub client_addr: String,
    /// The same address as a decimal integer string, "0" if unparseable.
    pub client_addr_decimal: String,
    /// Milliseconds since the unix epoch.
    pub unix_millis: u64,
    pub user_agent: String,
    pub path: String,
    pub query: String,
    pub host: String,
    pub method: String,
}

impl EvaluationArgs {
    /// The JSON array sent over the wire, in contract order.
    pub fn to_wire(&self) -> Value {
        json!([
            self.client_addr,
            self.client_addr_decimal,
            self.unix_millis,
            self.user_agent,
            self.path,
            self.query,
            self.host,
            self.method,
        ])
    }
}

/// Current wall-clock time in unix milliseconds, 0 if the clock is
/// before the epoch.
pub fn unix_millis_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_preserves_contract_order() {
        let args = EvaluationArgs {
            client_addr: "203.0.113.7".into(),
            client_addr_decimal: "281474087547143".into(),
            unix_millis: 1700000000000,
            user_agent: "curl/8.0".into(),
            path: "/login".into(),
            query: "next=/admin".into(),
            host: "example.com".into(),
            method: "POST".into(),
        };

        let wire = args.to_wire();
        let fields = wire.as_array().unwrap();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[0], "203.0.113.7");
        assert_eq!(fields[1], "281474087547143");
        assert_eq!(fields[2], 1700000000000u64);
        assert_eq!(fields[3], "curl/8.0");
        assert_eq!(fields[4], "/login");
        assert_eq!(fields[5], "next=/admin");
        assert_eq!(fields[6], "example.com");
        assert_eq!(fields[7], "POST");
    }
}
