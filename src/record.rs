use std::fmt;

/// Proxy protocols reported by the system configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Http,
    Https,
    Socks,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Protocol::Http, Protocol::Https, Protocol::Socks];

    /// Scheme given to a record of this protocol when the source carries none.
    pub fn default_scheme(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Socks => "socks5",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Socks => "socks",
        })
    }
}

/// One configured proxy endpoint.
///
/// A record always has a non-empty host and a port in `1..=65535`; an
/// unconfigured protocol is `None`, never a zeroed record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyRecord {
    scheme: Option<String>,
    host: String,
    port: u16,
}

impl ProxyRecord {
    /// Builds a record, or `None` if `host` is empty or `port` is zero.
    ///
    /// An empty `scheme` leaves the scheme unset.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Option<Self> {
        let scheme = scheme.into();
        let host = host.into();
        if host.is_empty() || port == 0 {
            return None;
        }
        Some(Self {
            scheme: (!scheme.is_empty()).then_some(scheme),
            host,
            port,
        })
    }

    /// Builds a record for a source that only reports host and port.
    pub fn without_scheme(host: impl Into<String>, port: u16) -> Option<Self> {
        Self::new(String::new(), host, port)
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

/// Formats as `scheme://host:port`, e.g. `http://127.0.0.1:8080`.
impl fmt::Display for ProxyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}:{}",
            self.scheme().unwrap_or_default(),
            self.host,
            self.port
        )
    }
}

/// The HTTP, HTTPS and SOCKS proxies taken from a single read of the OS state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResult {
    pub http: Option<ProxyRecord>,
    pub https: Option<ProxyRecord>,
    pub socks: Option<ProxyRecord>,
}

impl FetchResult {
    pub fn get(&self, protocol: Protocol) -> Option<&ProxyRecord> {
        match protocol {
            Protocol::Http => self.http.as_ref(),
            Protocol::Https => self.https.as_ref(),
            Protocol::Socks => self.socks.as_ref(),
        }
    }

    pub fn take(self, protocol: Protocol) -> Option<ProxyRecord> {
        match protocol {
            Protocol::Http => self.http,
            Protocol::Https => self.https,
            Protocol::Socks => self.socks,
        }
    }

    /// True when no protocol has a proxy configured.
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none() && self.socks.is_none()
    }

    /// Configured proxies in HTTP, HTTPS, SOCKS order.
    pub fn iter(&self) -> impl Iterator<Item = (Protocol, &ProxyRecord)> {
        Protocol::ALL
            .into_iter()
            .filter_map(move |protocol| self.get(protocol).map(|record| (protocol, record)))
    }
}

impl From<FetchResult> for (Option<ProxyRecord>, Option<ProxyRecord>, Option<ProxyRecord>) {
    fn from(result: FetchResult) -> Self {
        (result.http, result.https, result.socks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_scheme_host_port() {
        let record = ProxyRecord::new("http", "127.0.0.1", 8080).unwrap();
        assert_eq!(record.to_string(), "http://127.0.0.1:8080");

        let record = ProxyRecord::new("socks5", "proxy.internal", 1080).unwrap();
        assert_eq!(record.to_string(), "socks5://proxy.internal:1080");
    }

    #[test]
    fn unset_scheme_renders_empty() {
        let record = ProxyRecord::without_scheme("proxy.local", 3128).unwrap();
        assert_eq!(record.scheme(), None);
        assert_eq!(record.to_string(), "://proxy.local:3128");
    }

    #[test]
    fn rejects_empty_host_and_zero_port() {
        assert!(ProxyRecord::new("http", "", 8080).is_none());
        assert!(ProxyRecord::new("http", "proxy", 0).is_none());
        assert!(ProxyRecord::new("http", "proxy", u16::MAX).is_some());
    }

    #[test]
    fn fetch_result_accessors() {
        let result = FetchResult {
            http: ProxyRecord::new("http", "a", 1),
            https: None,
            socks: ProxyRecord::new("socks5", "c", 3),
        };

        assert!(!result.is_empty());
        assert_eq!(result.get(Protocol::Http).map(|r| r.host()), Some("a"));
        assert!(result.get(Protocol::Https).is_none());

        let seen: Vec<Protocol> = result.iter().map(|(protocol, _)| protocol).collect();
        assert_eq!(seen, vec![Protocol::Http, Protocol::Socks]);

        let socks = result.clone().take(Protocol::Socks).unwrap();
        assert_eq!(socks.port(), 3);

        let (http, https, _) = result.into();
        assert!(http.is_some());
        assert!(https.is_none());
        assert!(FetchResult::default().is_empty());
    }
}
