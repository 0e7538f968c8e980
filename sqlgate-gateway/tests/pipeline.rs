//! End-to-end tests of the request pipeline: authenticator → schema
//! validation → dispatch → envelope, against scripted engines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use sqlgate_core::{ExecOutcome, QueryOutcome, Row, SqlValue, Statement, MAX_QUERY_TEXT_CHARS};
use sqlgate_engine::{Engine, EngineError};
use sqlgate_gateway::config::SharedSecret;
use sqlgate_gateway::routes::{create_router, AppState};

const SECRET: &str = "0123456789abcdef0123456789abcdef";

/// Counts engine invocations and echoes each statement's first parameter
/// back as a `sentinel` column; statements whose text contains `boom`
/// fail per-item inside a batch and outright on the single-query path.
struct EchoEngine {
    calls: Arc<AtomicUsize>,
}

impl EchoEngine {
    fn sentinel_row(stmt: &Statement) -> Row {
        let mut row = Row::new();
        row.insert(
            "sentinel".to_owned(),
            stmt.params.first().cloned().unwrap_or(SqlValue::Null),
        );
        row
    }
}

#[async_trait]
impl Engine for EchoEngine {
    async fn run(&self, stmt: &Statement) -> Result<QueryOutcome, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if stmt.text.contains("boom") {
            return Err(EngineError::Query("no such table: boom".to_owned()));
        }
        Ok(QueryOutcome::with_rows(
            vec![Self::sentinel_row(stmt)],
            Some(json!({"rowsRead": 1})),
        ))
    }

    async fn run_batch(&self, stmts: &[Statement]) -> Result<Vec<QueryOutcome>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(stmts
            .iter()
            .map(|stmt| {
                if stmt.text.contains("boom") {
                    QueryOutcome::with_error("no such table: boom")
                } else {
                    QueryOutcome::with_rows(vec![Self::sentinel_row(stmt)], None)
                }
            })
            .collect())
    }

    async fn exec_raw(&self, sql: &str) -> Result<ExecOutcome, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ExecOutcome::new(sql.lines().count() as u64, 1.25))
    }
}

fn app_with_counter() -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = EchoEngine {
        calls: Arc::clone(&calls),
    };
    let secret = SharedSecret::new(SECRET).expect("test secret is long enough");
    let app = create_router(AppState::new(Arc::new(engine), secret));
    (app, calls)
}

fn post_json(path: &str, token: Option<String>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }
    builder
        .body(Body::from(body.to_owned()))
        .expect("request builds")
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("infallible service");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 4 << 20)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("every response body is JSON");
    (status, value)
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

// ── Authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn query_routes_reject_missing_header_without_engine_call() {
    let (app, calls) = app_with_counter();

    for path in ["/query/all/", "/query/exec/", "/query/batch/"] {
        let (status, body) =
            send(&app, post_json(path, None, r#"{"queryText":"SELECT 1"}"#)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(body, json!({"error": "unauthorized"}), "{path}");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0, "engine must never be consulted");
}

#[tokio::test]
async fn query_routes_reject_wrong_token_and_scheme() {
    let (app, calls) = app_with_counter();
    let body = r#"{"queryText":"SELECT 1"}"#;

    for token in [
        bearer("0123456789abcdef0123456789abcdeX"),
        bearer(""),
        format!("Basic {SECRET}"),
        SECRET.to_owned(),
        bearer(&format!("{SECRET}x")),
    ] {
        let (status, resp) = send(&app, post_json("/query/all/", Some(token.clone()), body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "token {token:?}");
        assert_eq!(
            resp["error"], "unauthorized",
            "401 must not say why: {token:?}"
        );
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn root_route_needs_no_credential() {
    let (app, _) = app_with_counter();
    let req = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("request builds");
    let resp = app.oneshot(req).await.expect("infallible service");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ── Validation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_batch_is_rejected_before_the_engine() {
    let (app, calls) = app_with_counter();

    let (status, body) = send(
        &app,
        post_json("/query/batch/", Some(bearer(SECRET)), r#"{"batch":[]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("batch")));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unauthenticated_empty_batch_still_gets_401() {
    // The authenticator runs before schema validation.
    let (app, calls) = app_with_counter();

    let (status, _) = send(&app, post_json("/query/batch/", None, r#"{"batch":[]}"#)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn query_text_boundary_at_ten_thousand_chars() {
    let (app, calls) = app_with_counter();

    let at_limit = json!({"queryText": "x".repeat(MAX_QUERY_TEXT_CHARS)}).to_string();
    let (status, _) = send(&app, post_json("/query/all/", Some(bearer(SECRET)), &at_limit)).await;
    assert_eq!(status, StatusCode::OK);

    let over = json!({"queryText": "x".repeat(MAX_QUERY_TEXT_CHARS + 1)}).to_string();
    let (status, body) = send(&app, post_json("/query/all/", Some(bearer(SECRET)), &over)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert_eq!(calls.load(Ordering::SeqCst), 1, "only the in-range query may dispatch");
}

#[tokio::test]
async fn exec_text_boundary_at_one_million_chars() {
    let (app, calls) = app_with_counter();

    let at_limit = json!({"queryText": "y".repeat(1_000_000)}).to_string();
    let (status, _) = send(&app, post_json("/query/exec/", Some(bearer(SECRET)), &at_limit)).await;
    assert_eq!(status, StatusCode::OK);

    let over = json!({"queryText": "y".repeat(1_000_001)}).to_string();
    let (status, _) = send(&app, post_json("/query/exec/", Some(bearer(SECRET)), &over)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn whitespace_only_query_text_is_rejected() {
    let (app, calls) = app_with_counter();

    let (status, _) = send(
        &app,
        post_json("/query/all/", Some(bearer(SECRET)), r#"{"queryText":"   "}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ── Dispatch & envelopes ─────────────────────────────────────────────────────

#[tokio::test]
async fn batch_outcomes_match_submission_order() {
    let (app, _) = app_with_counter();

    let batch = json!({
        "batch": [
            {"queryText": "SELECT ?1 AS sentinel", "params": [10]},
            {"queryText": "SELECT boom", "params": [20]},
            {"queryText": "SELECT ?1 AS sentinel", "params": [30]},
        ]
    })
    .to_string();

    let (status, body) = send(&app, post_json("/query/batch/", Some(bearer(SECRET)), &batch)).await;
    assert_eq!(status, StatusCode::OK, "partial failure still answers 200");

    let items = body.as_array().expect("batch response is a JSON array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["results"][0]["sentinel"], 10);
    assert_eq!(items[1]["error"], "no such table: boom");
    assert!(items[1].get("results").is_none());
    assert_eq!(items[2]["results"][0]["sentinel"], 30);
}

#[tokio::test]
async fn identical_queries_return_identical_results() {
    let (app, calls) = app_with_counter();
    let body = r#"{"queryText":"SELECT ?1 AS sentinel","params":[7]}"#;

    let (status_a, first) = send(&app, post_json("/query/all/", Some(bearer(SECRET)), body)).await;
    let (status_b, second) = send(&app, post_json("/query/all/", Some(bearer(SECRET)), body)).await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(
        calls.load(Ordering::SeqCst),
        2,
        "the gateway adds no caching or deduplication"
    );
}

#[tokio::test]
async fn single_query_failure_echoes_engine_text() {
    let (app, _) = app_with_counter();

    let (status, body) = send(
        &app,
        post_json(
            "/query/all/",
            Some(bearer(SECRET)),
            r#"{"queryText":"SELECT boom"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "failed to run query: no such table: boom"}));
}

#[tokio::test]
async fn exec_envelope_carries_count_and_duration() {
    let (app, _) = app_with_counter();

    let (status, body) = send(
        &app,
        post_json(
            "/query/exec/",
            Some(bearer(SECRET)),
            r#"{"queryText":"INSERT INTO a VALUES(1);\nINSERT INTO a VALUES(2)"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert!(body["durationMs"].as_f64().is_some_and(|ms| ms >= 0.0));
}

#[tokio::test]
async fn engine_transport_failure_is_a_json_500() {
    struct UnreachableEngine;

    #[async_trait]
    impl Engine for UnreachableEngine {
        async fn run(&self, _stmt: &Statement) -> Result<QueryOutcome, EngineError> {
            Err(EngineError::Api("connect to db.internal:8093: refused".to_owned()))
        }

        async fn run_batch(&self, _stmts: &[Statement]) -> Result<Vec<QueryOutcome>, EngineError> {
            Err(EngineError::Api("connect to db.internal:8093: refused".to_owned()))
        }

        async fn exec_raw(&self, _sql: &str) -> Result<ExecOutcome, EngineError> {
            Err(EngineError::Api("connect to db.internal:8093: refused".to_owned()))
        }
    }

    let secret = SharedSecret::new(SECRET).expect("test secret is long enough");
    let app = create_router(AppState::new(Arc::new(UnreachableEngine), secret));

    for (path, body) in [
        ("/query/all/", r#"{"queryText":"SELECT 1"}"#),
        ("/query/exec/", r#"{"queryText":"SELECT 1"}"#),
        ("/query/batch/", r#"{"batch":[{"queryText":"SELECT 1"}]}"#),
    ] {
        let (status, resp) = send(&app, post_json(path, Some(bearer(SECRET)), body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert!(
            resp["error"]
                .as_str()
                .is_some_and(|e| e.starts_with("failed to run query: ")),
            "{path}: {resp}"
        );
    }
}
