// src/lib.rs

//! Reads the HTTP, HTTPS and SOCKS proxies configured on the operating system.
//!
//! The source depends on the target:
//!
//! 1. macOS: the SystemConfiguration proxies dictionary
//! 2. Windows: the WinHTTP IE proxy settings of the current user
//! 3. Linux and others: `http_proxy`, `https_proxy` and `all_proxy`
//!
//! Every call queries the OS again; nothing is cached. A protocol without a
//! usable proxy is `None`. Only a failure to read the configuration at all is
//! reported as an [`Error`].
//!
//! # Examples
//!
//! ```no_run
//! if let Some(proxy) = sysproxy::get_https()? {
//!     println!("{}", proxy); // e.g. https://127.0.0.1:7890
//! }
//! # Ok::<(), sysproxy::Error>(())
//! ```

pub mod env_proxy;
mod error;
mod record;
pub mod system_proxy;

pub use env_proxy::EnvironmentProvider;
pub use error::{Error, Result};
pub use record::{FetchResult, Protocol, ProxyRecord};
pub use system_proxy::SystemProvider;

/// A source of proxy configuration.
///
/// Only [`fetch_all`](ProxyProvider::fetch_all) touches the OS; the other
/// queries are derived from one snapshot of it.
pub trait ProxyProvider {
    /// Reads HTTP, HTTPS and SOCKS from a single read of the configuration.
    fn fetch_all(&self) -> Result<FetchResult>;

    fn get(&self, protocol: Protocol) -> Result<Option<ProxyRecord>> {
        Ok(self.fetch_all()?.take(protocol))
    }

    fn http(&self) -> Result<Option<ProxyRecord>> {
        self.get(Protocol::Http)
    }

    fn https(&self) -> Result<Option<ProxyRecord>> {
        self.get(Protocol::Https)
    }

    fn socks(&self) -> Result<Option<ProxyRecord>> {
        self.get(Protocol::Socks)
    }

    /// True if at least one of HTTP, HTTPS or SOCKS is configured.
    fn is_enabled(&self) -> Result<bool> {
        Ok(!self.fetch_all()?.is_empty())
    }
}

/// System HTTP proxy, if any.
pub fn get_http() -> Result<Option<ProxyRecord>> {
    system_proxy::system_provider().http()
}

/// System HTTPS proxy, if any.
pub fn get_https() -> Result<Option<ProxyRecord>> {
    system_proxy::system_provider().https()
}

/// System SOCKS proxy, if any.
pub fn get_socks() -> Result<Option<ProxyRecord>> {
    system_proxy::system_provider().socks()
}

/// All three system proxies, read from one snapshot.
pub fn get_all() -> Result<FetchResult> {
    system_proxy::system_provider().fetch_all()
}

/// Returns true if any system proxy (HTTP, HTTPS or SOCKS) is configured.
pub fn is_enabled() -> Result<bool> {
    system_proxy::system_provider().is_enabled()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed {
        result: FetchResult,
        calls: Cell<usize>,
    }

    impl Fixed {
        fn new(result: FetchResult) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl ProxyProvider for Fixed {
        fn fetch_all(&self) -> Result<FetchResult> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.result.clone())
        }
    }

    struct Unavailable;

    impl ProxyProvider for Unavailable {
        fn fetch_all(&self) -> Result<FetchResult> {
            Err(Error::Acquisition("store unavailable".to_string()))
        }
    }

    fn sample() -> FetchResult {
        FetchResult {
            http: ProxyRecord::new("http", "a", 1),
            https: ProxyRecord::new("https", "b", 2),
            socks: None,
        }
    }

    #[test]
    fn single_queries_match_fetch_all() {
        let provider = Fixed::new(sample());
        let all = provider.fetch_all().unwrap();

        assert_eq!(provider.http().unwrap(), all.http);
        assert_eq!(provider.https().unwrap(), all.https);
        assert_eq!(provider.socks().unwrap(), all.socks);
        assert_eq!(provider.calls.get(), 4);
    }

    #[test]
    fn is_enabled_when_any_record_present() {
        assert!(Fixed::new(sample()).is_enabled().unwrap());

        let socks_only = FetchResult {
            socks: ProxyRecord::new("socks5", "c", 1080),
            ..FetchResult::default()
        };
        assert!(Fixed::new(socks_only).is_enabled().unwrap());

        assert!(!Fixed::new(FetchResult::default()).is_enabled().unwrap());
    }

    #[test]
    fn acquisition_error_propagates() {
        let provider = Unavailable;
        assert!(matches!(provider.is_enabled(), Err(Error::Acquisition(_))));
        assert!(matches!(provider.http(), Err(Error::Acquisition(_))));
        assert!(matches!(provider.fetch_all(), Err(Error::Acquisition(_))));

        let err = provider.socks().unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to acquire system proxy settings: store unavailable"
        );
    }
}
