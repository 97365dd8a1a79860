// src/system_proxy/attributes.rs

//! Reading per-protocol entries out of a SystemConfiguration proxies dictionary.

use crate::record::{FetchResult, Protocol, ProxyRecord};

/// Dictionary keys holding one protocol's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolKeys {
    pub enable: &'static str,
    pub host: &'static str,
    pub port: &'static str,
}

impl ProtocolKeys {
    pub fn for_protocol(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Http => Self {
                enable: "HTTPEnable",
                host: "HTTPProxy",
                port: "HTTPPort",
            },
            Protocol::Https => Self {
                enable: "HTTPSEnable",
                host: "HTTPSProxy",
                port: "HTTPSPort",
            },
            Protocol::Socks => Self {
                enable: "SOCKSEnable",
                host: "SOCKSProxy",
                port: "SOCKSPort",
            },
        }
    }
}

/// Typed read access to a proxies dictionary.
pub trait AttributeSource {
    /// Integer stored under `key`; `None` if missing or not a number.
    fn number(&self, key: &str) -> Option<i64>;

    /// String stored under `key`; `None` if missing or not a string.
    fn string(&self, key: &str) -> Option<String>;
}

/// Reads one protocol. The enable flag is checked first; a disabled protocol
/// is absent even when host and port are filled in.
pub fn read_protocol<S>(source: &S, protocol: Protocol) -> Option<ProxyRecord>
where
    S: AttributeSource + ?Sized,
{
    let keys = ProtocolKeys::for_protocol(protocol);
    if source.number(keys.enable).unwrap_or(0) == 0 {
        return None;
    }

    let host = source.string(keys.host)?;
    let port = u16::try_from(source.number(keys.port)?).ok()?;
    ProxyRecord::new(protocol.default_scheme(), host, port)
}

pub fn read_all<S>(source: &S) -> FetchResult
where
    S: AttributeSource + ?Sized,
{
    FetchResult {
        http: read_protocol(source, Protocol::Http),
        https: read_protocol(source, Protocol::Https),
        socks: read_protocol(source, Protocol::Socks),
    }
}
