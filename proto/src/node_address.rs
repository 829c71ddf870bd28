use std::fmt::Display;

use crate::generated::client_namenode::NodeAddress;

impl NodeAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port: port as u32,
        }
    }
    /// uri usable by a tonic endpoint
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
    /// Accepts `host:port` and `http://host:port`.
    pub fn parse(addrs: &str) -> Option<Self> {
        let trimmed = addrs
            .trim()
            .trim_start_matches("http://")
            .trim_end_matches('/');
        let (host, port) = trimmed.rsplit_once(':')?;
        if host.is_empty() {
            return None;
        }
        let port: u16 = port.parse().ok()?;
        Some(Self::new(host, port))
    }
    /// Same node regardless of `localhost` / `127.0.0.1` spelling.
    pub fn same_node(&self, other: &NodeAddress) -> bool {
        fn canonical(host: &str) -> &str {
            if host == "localhost" { "127.0.0.1" } else { host }
        }
        self.port == other.port && canonical(&self.host) == canonical(&other.host)
    }
}

impl Display for NodeAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_uri_forms() {
        let plain = NodeAddress::parse("localhost:7000").unwrap();
        assert_eq!(plain, NodeAddress::new("localhost", 7000));
        let uri = NodeAddress::parse("http://10.0.0.2:7001/").unwrap();
        assert_eq!(uri.host, "10.0.0.2");
        assert_eq!(uri.port, 7001);
        assert_eq!(uri.endpoint(), "http://10.0.0.2:7001");
        assert_eq!(uri.to_string(), "10.0.0.2:7001");
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(NodeAddress::parse("localhost").is_none());
        assert!(NodeAddress::parse(":7000").is_none());
        assert!(NodeAddress::parse("localhost:notaport").is_none());
    }

    #[test]
    fn localhost_spellings_are_the_same_node() {
        let a = NodeAddress::new("localhost", 7000);
        let b = NodeAddress::new("127.0.0.1", 7000);
        assert!(a.same_node(&b));
        assert!(!a.same_node(&NodeAddress::new("127.0.0.1", 7001)));
    }
}
