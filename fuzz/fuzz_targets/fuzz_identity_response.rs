//! Fuzz target: classification of identity-service responses.
//!
//! Arbitrary bodies under 200 and 404 must classify without panicking.

#![no_main]

use hyper::StatusCode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let body = String::from_utf8_lossy(data);
    let _ = ide_boot::auth::classify_response(StatusCode::OK, &body);
    let _ = ide_boot::auth::classify_response(StatusCode::NOT_FOUND, &body);
});
