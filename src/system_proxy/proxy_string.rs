//! Parsing of the WinHTTP manual proxy string.
//!
//! Two layouts are in use:
//!
//! - `host:port`, applied to HTTP and HTTPS;
//! - `http=host:port;https=host:port;socks=host:port`, one entry per protocol.

use crate::record::{FetchResult, ProxyRecord};
use log::debug;

/// Parses the `lpszProxy` string of an IE proxy configuration.
///
/// Malformed entries are skipped one by one and never fail the whole string.
pub fn parse_proxy_string(raw: &str) -> FetchResult {
    let raw = raw.trim();
    if raw.is_empty() {
        return FetchResult::default();
    }

    if !raw.contains('=') {
        let record = parse_host_port(raw);
        return FetchResult {
            http: record.clone(),
            https: record,
            socks: None,
        };
    }

    let mut result = FetchResult::default();
    for entry in raw.split(';') {
        let Some((protocol, value)) = entry.trim().split_once('=') else {
            continue;
        };
        let Some(record) = parse_host_port(value) else {
            debug!("Skipping malformed proxy entry {:?}", entry);
            continue;
        };

        match protocol.trim().to_ascii_lowercase().as_str() {
            "http" => result.http = Some(record),
            "https" => result.https = Some(record),
            "socks" => result.socks = Some(record),
            other => debug!("Ignoring proxy entry for unknown protocol {:?}", other),
        }
    }
    result
}

/// Parses `host:port`, dropping any `scheme://` prefix. The scheme is not kept.
///
/// The value must split into exactly two parts at the first colon, so
/// `a:b:c` is rejected.
pub fn parse_host_port(value: &str) -> Option<ProxyRecord> {
    let mut value = value.trim();
    if let Some(idx) = value.find("://") {
        value = &value[idx + 3..];
    }

    let (host, port) = value.split_once(':')?;
    let port = port.parse::<u16>().ok()?;
    ProxyRecord::without_scheme(host, port)
}
