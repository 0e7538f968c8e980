//! Error types for the engine crate.

/// Errors that can occur while talking to the query engine.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The engine URL supplied at startup could not be parsed.
    #[error("invalid engine url: {0}")]
    InvalidUrl(String),

    /// The engine could not be reached or the HTTP exchange failed.
    #[error("engine request failed: {0}")]
    Api(String),

    /// The engine executed the request and reported a failure.
    ///
    /// Carries the engine's own error text, which the gateway surfaces
    /// to its trusted clients verbatim.
    #[error("{0}")]
    Query(String),

    /// The engine answered with a body this crate could not decode.
    #[error("invalid engine response: {0}")]
    Decode(String),
}
