// src/system_proxy/mod.rs

pub mod attributes;
pub mod proxy_string;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

/// Provider for the current platform's proxy configuration:
///
/// - macOS: [`macos::AttributeStoreProvider`], the SystemConfiguration store;
/// - Windows: [`windows::RegistryProvider`], the WinHTTP IE proxy settings;
/// - anything else: [`EnvironmentProvider`](crate::EnvironmentProvider),
///   the `*_proxy` environment variables.
#[cfg(target_os = "macos")]
pub type SystemProvider = macos::AttributeStoreProvider;

#[cfg(target_os = "windows")]
pub type SystemProvider = windows::RegistryProvider;

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub type SystemProvider = crate::env_proxy::EnvironmentProvider;

/// Returns the provider for the platform this crate was built for.
pub fn system_provider() -> SystemProvider {
    SystemProvider::default()
}
