//! Fuzz target: JSON deserialization and validation of the single-query
//! request body.
//!
//! Verifies that arbitrary byte sequences never cause panics in body
//! parsing or statement preparation — errors are expected and fine.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlgate_gateway::schema::QueryBody;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = serde_json::from_slice::<QueryBody>(data) {
        let _ = body.into_statement();
    }
});
