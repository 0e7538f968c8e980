//! Text ceilings and normalization shared by the gateway and engine.

use crate::error::CoreError;

/// Maximum length, in Unicode scalar values, of a single prepared query.
pub const MAX_QUERY_TEXT_CHARS: usize = 10_000;

/// Maximum length of a raw exec body.
///
/// Larger than [`MAX_QUERY_TEXT_CHARS`] because an exec body may contain
/// many statements concatenated by a separator the engine understands.
pub const MAX_EXEC_TEXT_CHARS: usize = 1_000_000;

/// Trim statement text and enforce the given character ceiling.
///
/// Lengths are measured on the trimmed text, and the trimmed text is what
/// callers forward to the engine.
///
/// # Errors
/// Returns [`CoreError::EmptyText`] if nothing remains after trimming, or
/// [`CoreError::TextTooLong`] if the trimmed text exceeds `max_chars`.
pub fn normalize_sql(raw: &str, max_chars: usize) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyText);
    }
    let len = trimmed.chars().count();
    if len > max_chars {
        return Err(CoreError::TextTooLong { len, max: max_chars });
    }
    Ok(trimmed.to_owned())
}
