//! Fuzz target: cookie domain derivation from arbitrary `Host` values.
//!
//! The derived domain must never panic and must always be a substring of
//! the input host.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(host) = std::str::from_utf8(data) else {
        return;
    };
    let domain = ide_core::derive_cookie_domain(host);
    assert!(host.contains(domain.as_str()), "domain {domain:?} not taken from {host:?}");
});
