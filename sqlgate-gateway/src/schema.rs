//! Request schemas and response envelopes for the three query routes.
//!
//! The wire field for query text is `queryText` on every route. Parameters
//! are untyped scalars passed through to the engine; the gateway performs
//! no SQL-level inspection of the text.

use serde::{Deserialize, Serialize};

use sqlgate_core::{normalize_sql, QueryOutcome, Row, SqlValue, Statement, MAX_EXEC_TEXT_CHARS};

use crate::error::GatewayError;

// ── Request bodies ────────────────────────────────────────────────────────────

/// Body of `POST /query/all/`.
#[derive(Debug, Deserialize)]
pub struct QueryBody {
    /// SQL text, 1..=10,000 chars after trimming.
    #[serde(rename = "queryText")]
    pub query_text: String,

    /// Positional scalar parameters, bound in order.
    #[serde(default)]
    pub params: Option<Vec<SqlValue>>,
}

impl QueryBody {
    /// Validate into a prepared, bound statement.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidRequest`] if the text violates the
    /// prepared-query invariants.
    pub fn into_statement(self) -> Result<Statement, GatewayError> {
        let stmt = Statement::prepare(&self.query_text)?;
        Ok(match self.params {
            Some(params) => stmt.bind(params),
            None => stmt,
        })
    }
}

/// Body of `POST /query/exec/`.
#[derive(Debug, Deserialize)]
pub struct ExecBody {
    /// Raw, possibly multi-statement SQL, 1..=1,000,000 chars after
    /// trimming.
    #[serde(rename = "queryText")]
    pub query_text: String,
}

impl ExecBody {
    /// Validate into normalized exec text.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidRequest`] if the text is empty or
    /// over the exec ceiling.
    pub fn into_sql(self) -> Result<String, GatewayError> {
        Ok(normalize_sql(&self.query_text, MAX_EXEC_TEXT_CHARS)?)
    }
}

/// Body of `POST /query/batch/`.
#[derive(Debug, Deserialize)]
pub struct BatchBody {
    /// At least one query; outcomes come back in this order.
    pub batch: Vec<QueryBody>,
}

impl BatchBody {
    /// Validate every entry into prepared, bound statements.
    ///
    /// # Errors
    /// Rejects an empty batch and any entry violating the prepared-query
    /// invariants; nothing reaches the engine on failure.
    pub fn into_statements(self) -> Result<Vec<Statement>, GatewayError> {
        if self.batch.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "batch must not be empty".to_owned(),
            ));
        }
        self.batch
            .into_iter()
            .map(QueryBody::into_statement)
            .collect()
    }
}

// ── Response envelopes ────────────────────────────────────────────────────────

/// Success envelope of `POST /query/all/`.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// All result rows, in engine order.
    pub results: Vec<Row>,

    /// Engine execution metadata, forwarded verbatim; `null` when the
    /// engine reported none.
    pub meta: serde_json::Value,
}

/// One element of the `POST /query/batch/` response array.
///
/// Mirrors [`QueryOutcome`] under the external contract's field names; a
/// partially successful batch carries `error` on the failed items only.
#[derive(Debug, Serialize)]
pub struct BatchItem {
    /// Result rows for this statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Row>>,

    /// Engine-reported failure for this statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Engine execution metadata for this statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl From<QueryOutcome> for BatchItem {
    fn from(outcome: QueryOutcome) -> Self {
        Self {
            results: outcome.rows,
            error: outcome.error,
            meta: outcome.meta,
        }
    }
}
