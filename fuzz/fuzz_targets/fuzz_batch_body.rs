//! Fuzz target: JSON deserialization and validation of the batch request
//! body.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlgate_gateway::schema::BatchBody;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = serde_json::from_slice::<BatchBody>(data) {
        let _ = body.into_statements();
    }
});
