//! Database capability abstraction trait.
//!
//! Keeps the gateway independent of how the query engine is reached.
//! The HTTP implementation lives in [`crate::http`]; tests inject
//! scripted in-memory implementations.

use async_trait::async_trait;

use sqlgate_core::{ExecOutcome, QueryOutcome, Statement};

use crate::EngineError;

/// Bound database capability.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
/// Every method is a suspension point; callers await the engine rather
/// than blocking, and no call is retried by this layer.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Execute one prepared statement and return its rows and metadata.
    ///
    /// # Errors
    /// Returns [`EngineError::Query`] if the engine rejected the statement,
    /// or [`EngineError::Api`]/[`EngineError::Decode`] if the engine could
    /// not be reached or answered malformed.
    async fn run(&self, stmt: &Statement) -> Result<QueryOutcome, EngineError>;

    /// Execute a batch of prepared statements in one logical round-trip.
    ///
    /// Returns exactly one outcome per submitted statement, in submission
    /// order; an outcome may carry a per-statement `error` without failing
    /// the batch. Whether the batch runs transactionally is the engine's
    /// guarantee, not this interface's.
    ///
    /// # Errors
    /// Returns [`EngineError::Api`]/[`EngineError::Decode`] if the batch
    /// as a whole could not be submitted or its response read.
    async fn run_batch(&self, stmts: &[Statement]) -> Result<Vec<QueryOutcome>, EngineError>;

    /// Execute raw, possibly multi-statement SQL.
    ///
    /// Reports only the aggregate statement count and duration; row-level
    /// results are not guaranteed across statements.
    ///
    /// # Errors
    /// Returns [`EngineError::Query`] if the engine rejected the text, or
    /// [`EngineError::Api`]/[`EngineError::Decode`] on transport or
    /// decode failure.
    async fn exec_raw(&self, sql: &str) -> Result<ExecOutcome, EngineError>;
}
