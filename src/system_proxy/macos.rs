// src/system_proxy/macos.rs

use super::attributes::{self, AttributeSource};
use crate::{Error, FetchResult, ProxyProvider, Result};
use core_foundation::base::TCFType;
use core_foundation::string::{CFString, CFStringRef};
use core_foundation_sys::base::{CFGetTypeID, CFRelease};
use core_foundation_sys::dictionary::{CFDictionaryGetValue, CFDictionaryRef};
use core_foundation_sys::number::{kCFNumberSInt64Type, CFNumberGetTypeID, CFNumberGetValue, CFNumberRef};
use core_foundation_sys::string::CFStringGetTypeID;
use log::{debug, warn};
use std::os::raw::c_void;
use std::ptr;
use system_configuration_sys::dynamic_store_copy_specific::SCDynamicStoreCopyProxies;

/// Reads the proxies dictionary published by `configd` through
/// `SCDynamicStoreCopyProxies`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeStoreProvider;

impl ProxyProvider for AttributeStoreProvider {
    fn fetch_all(&self) -> Result<FetchResult> {
        let proxies: CFDictionaryRef = unsafe { SCDynamicStoreCopyProxies(ptr::null()) };
        if proxies.is_null() {
            warn!("SCDynamicStoreCopyProxies returned no proxy dictionary");
            return Err(Error::Acquisition(
                "SCDynamicStoreCopyProxies returned null".to_string(),
            ));
        }

        // Copy rule: released on every return path below.
        let proxies = scopeguard::guard(proxies, |dict| unsafe {
            CFRelease(dict as *const c_void);
        });

        let result = attributes::read_all(&ProxyDictionary(*proxies));
        for (protocol, record) in result.iter() {
            debug!("Found macOS {} proxy: {}", protocol, record);
        }
        Ok(result)
    }
}

/// Borrowed view of a proxies dictionary; does not own the reference.
struct ProxyDictionary(CFDictionaryRef);

impl ProxyDictionary {
    fn value(&self, key: &str) -> *const c_void {
        let key = CFString::new(key);
        unsafe { CFDictionaryGetValue(self.0, key.as_concrete_TypeRef() as *const c_void) }
    }
}

impl AttributeSource for ProxyDictionary {
    fn number(&self, key: &str) -> Option<i64> {
        let value = self.value(key);
        if value.is_null() || unsafe { CFGetTypeID(value) } != unsafe { CFNumberGetTypeID() } {
            return None;
        }

        let mut number: i64 = 0;
        let ok = unsafe {
            CFNumberGetValue(
                value as CFNumberRef,
                kCFNumberSInt64Type,
                &mut number as *mut i64 as *mut c_void,
            )
        };
        ok.then_some(number)
    }

    fn string(&self, key: &str) -> Option<String> {
        let value = self.value(key);
        if value.is_null() || unsafe { CFGetTypeID(value) } != unsafe { CFStringGetTypeID() } {
            return None;
        }
        // Get rule: the dictionary keeps ownership of the value.
        let host = unsafe { CFString::wrap_under_get_rule(value as CFStringRef) };
        Some(host.to_string())
    }
}
