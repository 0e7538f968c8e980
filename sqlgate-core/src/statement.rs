use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::limits::{normalize_sql, MAX_QUERY_TEXT_CHARS};
use crate::value::SqlValue;

/// A prepared statement: normalized SQL text plus ordered bound parameters.
///
/// Binding is positional and order-preserving. Placeholder syntax and
/// type coercion belong to the engine; the gateway only carries the
/// values through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Trimmed, non-empty SQL text.
    pub text: String,
    /// Positional parameters, in submission order.
    pub params: Vec<SqlValue>,
}

impl Statement {
    /// Prepare a statement from raw text, with no parameters bound.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyText`] if the text is empty after
    /// trimming, or [`CoreError::TextTooLong`] if it exceeds
    /// [`MAX_QUERY_TEXT_CHARS`].
    pub fn prepare(text: &str) -> Result<Self, CoreError> {
        Ok(Self {
            text: normalize_sql(text, MAX_QUERY_TEXT_CHARS)?,
            params: Vec::new(),
        })
    }

    /// Bind positional parameters, replacing any previously bound set.
    #[must_use]
    pub fn bind(mut self, params: Vec<SqlValue>) -> Self {
        self.params = params;
        self
    }
}
