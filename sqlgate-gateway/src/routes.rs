//! Axum route handlers for the sqlgate API.
//!
//! Control flow per query route: authenticator (reject unauthenticated) →
//! schema validation (reject malformed) → dispatch to the engine →
//! envelope. Engine failures are caught here, at one boundary per
//! operation, and never escape as a bare framework error page.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{any, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use sqlgate_engine::{Engine, EngineError};

use crate::auth::require_bearer;
use crate::config::SharedSecret;
use crate::error::GatewayError;
use crate::schema::{BatchBody, BatchItem, ExecBody, QueryBody, QueryResponse};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Immutable per-process state injected into every handler.
///
/// Fixed at startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Bound database capability.
    pub engine: Arc<dyn Engine>,
    /// Shared bearer secret for the query routes.
    pub secret: SharedSecret,
    /// When this process started serving.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Bundle the engine and secret fixed at startup.
    #[must_use]
    pub fn new(engine: Arc<dyn Engine>, secret: SharedSecret) -> Self {
        Self {
            engine,
            secret,
            started_at: Utc::now(),
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router.
///
/// The `/query/*` routes sit behind the bearer authenticator; the root
/// diagnostic route does not.
pub fn create_router(state: AppState) -> Router {
    let queries = Router::new()
        .route("/query/all/", post(query_all))
        .route("/query/exec/", post(query_exec))
        .route("/query/batch/", post(query_batch))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    Router::new()
        .merge(queries)
        .route("/", any(index))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `ANY /` — unauthenticated diagnostic route listing.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "service": "sqlgate",
            "version": env!("CARGO_PKG_VERSION"),
            "startedAt": state.started_at.to_rfc3339(),
            "routes": [
                "POST /query/all/",
                "POST /query/exec/",
                "POST /query/batch/",
            ],
        })),
    )
}

/// `POST /query/all/` — run one statement, return all rows plus metadata.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if the body is malformed or
/// violates the prepared-query invariants, or [`GatewayError::Engine`]
/// if the engine fails.
pub async fn query_all(
    State(state): State<AppState>,
    body: Result<Json<QueryBody>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(body) = body.map_err(bad_json)?;
    let stmt = body.into_statement()?;

    tracing::debug!(
        request_id = %Uuid::new_v4(),
        params = stmt.params.len(),
        "dispatching query"
    );

    let outcome = state.engine.run(&stmt).await?;
    if let Some(error) = outcome.error {
        return Err(GatewayError::Engine(EngineError::Query(error)));
    }

    Ok(Json(QueryResponse {
        results: outcome.rows.unwrap_or_default(),
        meta: outcome.meta.unwrap_or(serde_json::Value::Null),
    }))
}

/// `POST /query/batch/` — run every statement in one engine round-trip.
///
/// Per-statement engine failures come back as that item's `error` field;
/// the batch as a whole still answers 200. Whether the engine ran the
/// batch transactionally is the engine's guarantee, not the gateway's.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] for an empty batch or any
/// invalid entry, [`GatewayError::Engine`] if the batch could not be
/// submitted, or [`GatewayError::Internal`] if the engine answered with
/// the wrong number of outcomes.
pub async fn query_batch(
    State(state): State<AppState>,
    body: Result<Json<BatchBody>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(body) = body.map_err(bad_json)?;
    let stmts = body.into_statements()?;

    tracing::debug!(
        request_id = %Uuid::new_v4(),
        statements = stmts.len(),
        "dispatching batch"
    );

    let outcomes = state.engine.run_batch(&stmts).await?;
    if outcomes.len() != stmts.len() {
        return Err(GatewayError::Internal(format!(
            "engine returned {} outcomes for {} statements",
            outcomes.len(),
            stmts.len()
        )));
    }

    let items: Vec<BatchItem> = outcomes.into_iter().map(BatchItem::from).collect();
    Ok(Json(items))
}

/// `POST /query/exec/` — forward raw multi-statement SQL verbatim.
///
/// Reports only the aggregate count and duration; exec's engine
/// semantics do not guarantee row-level results across statements.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if the body is malformed or
/// over the exec ceiling, or [`GatewayError::Engine`] if the engine
/// fails.
pub async fn query_exec(
    State(state): State<AppState>,
    body: Result<Json<ExecBody>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(body) = body.map_err(bad_json)?;
    let sql = body.into_sql()?;

    tracing::debug!(
        request_id = %Uuid::new_v4(),
        chars = sql.chars().count(),
        "dispatching exec"
    );

    let outcome = state.engine.exec_raw(&sql).await?;
    Ok(Json(outcome))
}

/// Map a body-extraction rejection into the JSON error envelope.
fn bad_json(rejection: JsonRejection) -> GatewayError {
    GatewayError::InvalidRequest(rejection.body_text())
}
