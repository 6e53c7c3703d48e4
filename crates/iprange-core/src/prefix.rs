//! CIDR expression parsing
//!
//! Sources return raw range expressions as strings. An expression is either a
//! CIDR form (`1.2.3.0/24`, `2001:db8::/32`) or a bare address, which maps to
//! a full-length prefix (`1.2.3.4` → `1.2.3.4/32`).

use ipnetwork::IpNetwork;
use std::net::IpAddr;

use crate::error::{Error, Result};

/// Parse one raw range expression into a prefix
pub fn parse_range_expression(expr: &str) -> Result<IpNetwork> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(Error::parse(expr, "empty expression"));
    }

    if expr.contains('/') {
        expr.parse::<IpNetwork>()
            .map_err(|e| Error::parse(expr, e.to_string()))
    } else {
        // Bare address: full-length prefix for its family
        expr.parse::<IpAddr>()
            .map(IpNetwork::from)
            .map_err(|e| Error::parse(expr, e.to_string()))
    }
}

/// Parse a full fetch result, all-or-nothing
///
/// If any single expression fails to parse, the whole batch is rejected: an
/// incomplete range list could under-match, so a stale snapshot is preferred
/// over a partial one.
pub fn parse_range_expressions<S: AsRef<str>>(raw: &[S]) -> Result<Vec<IpNetwork>> {
    let mut prefixes = Vec::with_capacity(raw.len());
    for expr in raw {
        prefixes.push(parse_range_expression(expr.as_ref())?);
    }
    Ok(prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v4_cidr() {
        let prefix = parse_range_expression("1.2.3.0/24").unwrap();
        assert_eq!(prefix.to_string(), "1.2.3.0/24");
        assert_eq!(prefix.prefix(), 24);
    }

    #[test]
    fn parses_v6_cidr() {
        let prefix = parse_range_expression("2001:db8::/32").unwrap();
        assert!(prefix.is_ipv6());
        assert_eq!(prefix.prefix(), 32);
    }

    #[test]
    fn bare_address_gets_full_length_prefix() {
        let v4 = parse_range_expression("9.9.9.9").unwrap();
        assert_eq!(v4.prefix(), 32);

        let v6 = parse_range_expression("2001:db8::1").unwrap();
        assert_eq!(v6.prefix(), 128);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let prefix = parse_range_expression("  10.0.0.0/8 ").unwrap();
        assert_eq!(prefix.to_string(), "10.0.0.0/8");
    }

    #[test]
    fn rejects_junk() {
        assert!(parse_range_expression("not-a-cidr").is_err());
        assert!(parse_range_expression("").is_err());
        assert!(parse_range_expression("1.2.3.0/99").is_err());
    }

    #[test]
    fn batch_parse_is_all_or_nothing() {
        let raw = ["1.2.3.0/24", "not-a-cidr", "10.0.0.0/8"];
        assert!(parse_range_expressions(&raw).is_err());

        let raw = ["1.2.3.0/24", "2001:db8::/32"];
        let prefixes = parse_range_expressions(&raw).unwrap();
        assert_eq!(prefixes.len(), 2);
        assert_eq!(prefixes[0].to_string(), "1.2.3.0/24");
        assert_eq!(prefixes[1].to_string(), "2001:db8::/32");
    }
}
