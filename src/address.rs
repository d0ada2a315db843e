//! Address normalization
//!
//! The underlying transport does not guarantee the bracketed literal form
//! for IPv6 host:port strings, so `::1:37017` and `[::1]:37017` may both
//! appear in configuration and status documents for the same member. Every
//! address read back from the store goes through [`normalize_host_port`]
//! before it is compared or returned, so identity checks are independent of
//! how the transport formatted the address.

/// Canonicalize a host:port string.
///
/// A bare IPv6 literal with a trailing port (two or more colons, not already
/// bracketed, numeric final segment) is rewritten as `[host]:port`. Hostnames
/// and IPv4 addresses pass through unchanged, as do already-bracketed
/// literals.
pub fn normalize_host_port(addr: &str) -> String {
    if addr.starts_with('[') || addr.matches(':').count() < 2 {
        return addr.to_string();
    }
    match addr.rfind(':') {
        // The host half must itself still look like an IPv6 literal; a port
        // tail that is not all digits means this was never host:port.
        Some(idx)
            if addr[..idx].matches(':').count() >= 2
                && idx + 1 < addr.len()
                && addr[idx + 1..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            format!("[{}]:{}", &addr[..idx], &addr[idx + 1..])
        }
        _ => addr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_unchanged() {
        assert_eq!(normalize_host_port("10.0.0.1:37017"), "10.0.0.1:37017");
    }

    #[test]
    fn test_hostname_unchanged() {
        assert_eq!(normalize_host_port("db0.internal:37017"), "db0.internal:37017");
        assert_eq!(normalize_host_port("localhost"), "localhost");
    }

    #[test]
    fn test_bare_ipv6_gets_brackets() {
        assert_eq!(normalize_host_port("::1:37017"), "[::1]:37017");
        assert_eq!(
            normalize_host_port("2001:db8::5:37017"),
            "[2001:db8::5]:37017"
        );
    }

    #[test]
    fn test_bracketed_ipv6_unchanged() {
        assert_eq!(normalize_host_port("[::1]:37017"), "[::1]:37017");
        assert_eq!(
            normalize_host_port("[2001:db8::5]:37017"),
            "[2001:db8::5]:37017"
        );
    }

    #[test]
    fn test_portless_literal_unchanged() {
        assert_eq!(normalize_host_port("::1"), "::1");
    }

    #[test]
    fn test_non_numeric_tail_unchanged() {
        // Not host:port at all, leave it alone rather than guess.
        assert_eq!(normalize_host_port("fe80::1%eth0"), "fe80::1%eth0");
    }
}
