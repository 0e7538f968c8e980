use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::SqlValue;

/// A single result row, mapping column name to scalar value in the order
/// the engine returned the columns.
pub type Row = IndexMap<String, SqlValue>;

/// Outcome of one executed statement.
///
/// A batch produces one of these per submitted statement; `error` is set
/// instead of `rows` when the engine failed that statement without
/// failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct QueryOutcome {
    /// Result rows, when the statement produced any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,

    /// Engine-reported failure for this statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Execution metadata (duration, row counts, ...), opaque to the
    /// gateway and forwarded verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl QueryOutcome {
    /// Outcome for a statement that returned rows.
    #[must_use]
    pub fn with_rows(rows: Vec<Row>, meta: Option<serde_json::Value>) -> Self {
        Self {
            rows: Some(rows),
            error: None,
            meta,
        }
    }

    /// Outcome for a statement the engine rejected.
    #[must_use]
    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            rows: None,
            error: Some(error.into()),
            meta: None,
        }
    }
}

/// Aggregate outcome of a raw multi-statement exec.
///
/// Exec reports no row data: the engine may have run many statements and
/// row-level results are not guaranteed across them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ExecOutcome {
    /// Number of statements the engine executed.
    pub count: u64,

    /// Wall-clock time the engine reported, in milliseconds.
    #[serde(rename = "durationMs")]
    pub duration_ms: f64,
}

impl ExecOutcome {
    /// Create an exec outcome.
    #[must_use]
    pub fn new(count: u64, duration_ms: f64) -> Self {
        Self { count, duration_ms }
    }
}
