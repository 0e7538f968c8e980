//! HTTP/1.1 implementation of the [`Engine`] capability.
//!
//! The query engine exposes a JSON API: `POST {base}/v1/query`,
//! `POST {base}/v1/batch`, `POST {base}/v1/exec`. Each call opens a fresh
//! connection, performs one exchange, and lets the connection drop; the
//! engine side owns connection pooling and statement lifecycle.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;

use sqlgate_core::{ExecOutcome, QueryOutcome, SqlValue, Statement};

use crate::engine::Engine;
use crate::{EngineConfig, EngineError};

/// JSON-over-HTTP client for the remote query engine.
#[derive(Debug, Clone)]
pub struct HttpEngine {
    config: EngineConfig,
}

impl HttpEngine {
    /// Create a client for the configured engine endpoint.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Send one POST exchange to the engine API.
    ///
    /// # Errors
    /// Returns [`EngineError::Api`] on connection or HTTP failure, or
    /// [`EngineError::Query`] when a non-2xx response carries the
    /// engine's own `{"error": ...}` body.
    async fn api_request(&self, path: &str, body: String) -> Result<Bytes, EngineError> {
        let authority = self.config.authority();
        let stream = TcpStream::connect(&authority)
            .await
            .map_err(|e| EngineError::Api(format!("connect to {authority}: {e}")))?;

        let io = TokioIo::new(stream);

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| EngineError::Api(format!("HTTP handshake: {e}")))?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!("engine connection closed: {e}");
            }
        });

        let uri_path = format!("{}{path}", self.config.base_path);
        let uri: Uri = uri_path
            .parse()
            .map_err(|e| EngineError::Api(format!("invalid URI path {uri_path}: {e}")))?;

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("Host", authority.as_str())
            .header("Content-Type", "application/json")
            .header("Content-Length", body.len().to_string());

        if let Some(token) = &self.config.token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let req = builder
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| EngineError::Api(format!("build request: {e}")))?;

        let resp: Response<_> = sender
            .send_request(req)
            .await
            .map_err(|e| EngineError::Api(format!("send request: {e}")))?;

        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| EngineError::Api(format!("read response body: {e}")))?
            .to_bytes();

        tracing::debug!(path, status = %status, bytes = bytes.len(), "engine exchange");

        if !status.is_success() {
            return Err(failure_from_response(status, &bytes));
        }

        Ok(bytes)
    }
}

/// Classify a non-2xx engine response.
///
/// The engine reports statement failures as JSON `{"error": ...}`; any
/// other body is a transport-level fault.
fn failure_from_response(status: StatusCode, body: &[u8]) -> EngineError {
    #[derive(Deserialize)]
    struct WireError {
        error: String,
    }

    match serde_json::from_slice::<WireError>(body) {
        Ok(wire) => EngineError::Query(wire.error),
        Err(_) => EngineError::Api(format!(
            "HTTP {status}: {}",
            String::from_utf8_lossy(body)
        )),
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, EngineError> {
    serde_json::to_string(value).map_err(|e| EngineError::Api(format!("encode request: {e}")))
}

fn decode<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, EngineError> {
    serde_json::from_slice(bytes).map_err(|e| EngineError::Decode(e.to_string()))
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct WireStatement<'a> {
    sql: &'a str,
    params: &'a [SqlValue],
}

impl<'a> From<&'a Statement> for WireStatement<'a> {
    fn from(stmt: &'a Statement) -> Self {
        Self {
            sql: &stmt.text,
            params: &stmt.params,
        }
    }
}

#[derive(Serialize)]
struct WireBatch<'a> {
    statements: Vec<WireStatement<'a>>,
}

#[derive(Serialize)]
struct WireExec<'a> {
    sql: &'a str,
}

#[derive(Deserialize)]
struct WireBatchOutcome {
    results: Vec<QueryOutcome>,
}

// ── Engine impl ───────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl Engine for HttpEngine {
    async fn run(&self, stmt: &Statement) -> Result<QueryOutcome, EngineError> {
        let body = encode(&WireStatement::from(stmt))?;
        let bytes = self.api_request("/v1/query", body).await?;
        decode(&bytes)
    }

    async fn run_batch(&self, stmts: &[Statement]) -> Result<Vec<QueryOutcome>, EngineError> {
        let body = encode(&WireBatch {
            statements: stmts.iter().map(WireStatement::from).collect(),
        })?;
        let bytes = self.api_request("/v1/batch", body).await?;
        let outcome: WireBatchOutcome = decode(&bytes)?;

        if outcome.results.len() != stmts.len() {
            return Err(EngineError::Decode(format!(
                "engine returned {} outcomes for {} statements",
                outcome.results.len(),
                stmts.len()
            )));
        }

        Ok(outcome.results)
    }

    async fn exec_raw(&self, sql: &str) -> Result<ExecOutcome, EngineError> {
        let body = encode(&WireExec { sql })?;
        let bytes = self.api_request("/v1/exec", body).await?;
        decode(&bytes)
    }
}
