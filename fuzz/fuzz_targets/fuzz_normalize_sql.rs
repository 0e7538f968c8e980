//! Fuzz target: statement text normalization.
//!
//! The trim + char-count bounds must hold for any UTF-8 input, including
//! multi-byte and zero-width characters.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlgate_core::{normalize_sql, MAX_QUERY_TEXT_CHARS};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(normalized) = normalize_sql(text, MAX_QUERY_TEXT_CHARS) {
            assert!(!normalized.is_empty());
            assert!(normalized.chars().count() <= MAX_QUERY_TEXT_CHARS);
        }
    }
});
