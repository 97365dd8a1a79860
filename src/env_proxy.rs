//! Proxy settings taken from the conventional `*_proxy` environment variables.

use crate::record::{FetchResult, Protocol, ProxyRecord};
use crate::{ProxyProvider, Result};
use log::debug;
use std::env;
use std::fmt;
use url::Url;

type Lookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Reads `http_proxy`, `https_proxy` and `all_proxy` (or their uppercase
/// forms). SOCKS is taken from `all_proxy`.
///
/// Never fails: unset or unparsable variables yield absent records.
pub struct EnvironmentProvider {
    lookup: Box<Lookup>,
}

impl EnvironmentProvider {
    /// Provider backed by the process environment.
    pub fn new() -> Self {
        Self::with_lookup(|name| env::var(name).ok())
    }

    /// Provider backed by a custom variable table.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }

    fn read(&self, protocol: Protocol) -> Option<ProxyRecord> {
        let raw = variable_names(protocol)
            .into_iter()
            .filter_map(|name| (self.lookup)(name))
            .find(|value| !value.is_empty())?;

        let record = parse_proxy_url(&raw, protocol);
        if record.is_none() {
            debug!("Ignoring unparsable {} proxy value {:?}", protocol, raw);
        }
        record
    }
}

impl Default for EnvironmentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvironmentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentProvider").finish_non_exhaustive()
    }
}

impl ProxyProvider for EnvironmentProvider {
    fn fetch_all(&self) -> Result<FetchResult> {
        Ok(FetchResult {
            http: self.read(Protocol::Http),
            https: self.read(Protocol::Https),
            socks: self.read(Protocol::Socks),
        })
    }
}

/// Variables consulted for `protocol`, in priority order.
pub fn variable_names(protocol: Protocol) -> [&'static str; 2] {
    match protocol {
        Protocol::Http => ["http_proxy", "HTTP_PROXY"],
        Protocol::Https => ["https_proxy", "HTTPS_PROXY"],
        Protocol::Socks => ["all_proxy", "ALL_PROXY"],
    }
}

/// Parses a proxy variable value such as `http://host:8080` or `host:8080`.
///
/// A URL must carry an explicit port. Values that are not URLs with a host
/// are split at the last colon and get the protocol's default scheme.
pub fn parse_proxy_url(raw: &str, protocol: Protocol) -> Option<ProxyRecord> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(raw) {
        if let Some(host) = url.host_str().filter(|host| !host.is_empty()) {
            let port = explicit_port(raw, &url)?;
            let host = host.trim_start_matches('[').trim_end_matches(']');
            return ProxyRecord::new(url.scheme(), host, port);
        }
    }

    let (host, port) = split_host_port(raw)?;
    let port = port.parse::<u16>().ok()?;
    ProxyRecord::new(protocol.default_scheme(), host, port)
}

/// Splits at the last colon.
fn split_host_port(s: &str) -> Option<(&str, &str)> {
    s.rsplit_once(':')
}

// `Url` drops a port equal to the scheme's default, so look for it in the
// raw authority before giving up.
fn explicit_port(raw: &str, url: &Url) -> Option<u16> {
    if let Some(port) = url.port() {
        return Some(port);
    }

    let (_, rest) = raw.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let (_, port) = authority.rsplit_once(':')?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    url.port_or_known_default()
}
