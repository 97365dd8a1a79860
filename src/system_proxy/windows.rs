// src/system_proxy/windows.rs

use super::proxy_string::parse_proxy_string;
use crate::{Error, FetchResult, ProxyProvider, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::ffi::OsString;
use std::io;
use std::mem;
use std::os::windows::ffi::OsStringExt;
use std::ptr;
use winapi::shared::minwindef::{BOOL, HGLOBAL};
use winapi::um::libloaderapi::{GetProcAddress, LoadLibraryA};
use winapi::um::winhttp::WINHTTP_CURRENT_USER_IE_PROXY_CONFIG;

type GetIeProxyConfigFn =
    unsafe extern "system" fn(*mut WINHTTP_CURRENT_USER_IE_PROXY_CONFIG) -> BOOL;
type GlobalFreeFn = unsafe extern "system" fn(HGLOBAL) -> HGLOBAL;

/// Entry points looked up once per process.
struct WinHttpApi {
    get_ie_proxy_config: GetIeProxyConfigFn,
    global_free: GlobalFreeFn,
}

static WINHTTP: Lazy<Option<WinHttpApi>> = Lazy::new(WinHttpApi::load);

impl WinHttpApi {
    fn load() -> Option<Self> {
        unsafe {
            let winhttp = LoadLibraryA(b"winhttp.dll\0".as_ptr().cast());
            let kernel32 = LoadLibraryA(b"kernel32.dll\0".as_ptr().cast());
            if winhttp.is_null() || kernel32.is_null() {
                warn!("LoadLibrary failed: {}", io::Error::last_os_error());
                return None;
            }

            let get_ie_proxy_config = GetProcAddress(
                winhttp,
                b"WinHttpGetIEProxyConfigForCurrentUser\0".as_ptr().cast(),
            );
            let global_free = GetProcAddress(kernel32, b"GlobalFree\0".as_ptr().cast());
            if get_ie_proxy_config.is_null() || global_free.is_null() {
                warn!("GetProcAddress failed: {}", io::Error::last_os_error());
                return None;
            }

            Some(Self {
                get_ie_proxy_config: mem::transmute(get_ie_proxy_config),
                global_free: mem::transmute(global_free),
            })
        }
    }

    fn release(&self, config: &WINHTTP_CURRENT_USER_IE_PROXY_CONFIG) {
        for field in [
            config.lpszAutoConfigUrl,
            config.lpszProxy,
            config.lpszProxyBypass,
        ] {
            if !field.is_null() {
                unsafe { (self.global_free)(field.cast()) };
            }
        }
    }
}

/// Reads the current user's IE proxy settings through
/// `WinHttpGetIEProxyConfigForCurrentUser`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryProvider;

impl ProxyProvider for RegistryProvider {
    fn fetch_all(&self) -> Result<FetchResult> {
        let api = WINHTTP.as_ref().ok_or_else(|| {
            Error::Acquisition("WinHttpGetIEProxyConfigForCurrentUser is unavailable".to_string())
        })?;

        // Strings are allocated by WinHTTP; freed on every path, including failure.
        let mut config = scopeguard::guard(
            WINHTTP_CURRENT_USER_IE_PROXY_CONFIG {
                fAutoDetect: 0,
                lpszAutoConfigUrl: ptr::null_mut(),
                lpszProxy: ptr::null_mut(),
                lpszProxyBypass: ptr::null_mut(),
            },
            |config| api.release(&config),
        );

        if unsafe { (api.get_ie_proxy_config)(&mut *config) } == 0 {
            let err = io::Error::last_os_error();
            warn!("WinHttpGetIEProxyConfigForCurrentUser failed: {}", err);
            return Err(Error::Acquisition(format!(
                "cannot get IE proxy config: {err}"
            )));
        }

        if config.fAutoDetect != 0 || !config.lpszAutoConfigUrl.is_null() {
            debug!("Automatic proxy configuration is set; only the manual proxy is read");
        }

        let proxy = wide_ptr_to_string(config.lpszProxy);
        let result = parse_proxy_string(&proxy);
        for (protocol, record) in result.iter() {
            debug!("Found Windows {} proxy: {}", protocol, record);
        }
        Ok(result)
    }
}

fn wide_ptr_to_string(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }
    let len = unsafe { (0..).take_while(|&i| *ptr.offset(i) != 0).count() };
    let slice = unsafe { std::slice::from_raw_parts(ptr, len) };
    OsString::from_wide(slice).to_string_lossy().into_owned()
}
