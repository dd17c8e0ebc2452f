//! Static table of conventional service names, used only to annotate reports.

/// Placeholder printed for ports that are not in the table.
pub const UNKNOWN_SERVICE: &str = "unknown";

const SERVICE_PORTS: [(u32, &str); 21] = [
    (21, "ftp"),
    (22, "ssh"),
    (23, "telnet"),
    (25, "smtp"),
    (43, "whois"),
    (53, "dns"),
    (69, "tftp"),
    (80, "http"),
    (123, "ntp"),
    (135, "msrpc"),
    (389, "ldap"),
    (443, "https"),
    (512, "rexec"),
    (513, "rlogin"),
    (514, "syslog"),
    (520, "rip"),
    (587, "smtp"),
    (1433, "mssql"),
    (3306, "mysql"),
    (5432, "postgres"),
    (8080, "http-proxy"),
];

/// Returns the conventional service name for `port`, if it has one.
///
/// ```rust
/// use portsweep::services::lookup;
///
/// assert_eq!(lookup(22), Some("ssh"));
/// assert_eq!(lookup(7000), None);
/// ```
#[must_use]
pub fn lookup(port: u32) -> Option<&'static str> {
    SERVICE_PORTS
        .binary_search_by_key(&port, |&(p, _)| p)
        .ok()
        .map(|idx| SERVICE_PORTS[idx].1)
}

#[cfg(test)]
mod tests {
    use super::{lookup, SERVICE_PORTS};
    use parameterized::parameterized;

    #[test]
    fn table_is_sorted_for_binary_search() {
        assert!(SERVICE_PORTS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[parameterized(port = {
        21, 22, 53, 443, 587, 5432, 8080,
    }, name = {
        "ftp", "ssh", "dns", "https", "smtp", "postgres", "http-proxy",
    })]
    fn known_ports_resolve(port: u32, name: &str) {
        assert_eq!(lookup(port), Some(name));
    }

    #[parameterized(port = { 0, 7000, 8443, 65535, 65536 })]
    fn unknown_ports_are_none(port: u32) {
        assert_eq!(lookup(port), None);
    }
}
