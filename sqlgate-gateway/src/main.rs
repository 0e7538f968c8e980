//! Entry point for the `sqlgate-gateway` HTTP server.

use std::sync::Arc;

use sqlgate_engine::HttpEngine;
use sqlgate_gateway::config::GatewayConfig;
use sqlgate_gateway::routes::{create_router, AppState};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "configuration rejected");
            std::process::exit(1);
        }
    };

    let engine_authority = config.engine.authority();
    let engine = Arc::new(HttpEngine::new(config.engine));
    let state = AppState::new(engine, config.secret);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.listen_addr,
        engine = %engine_authority,
        "sqlgate-gateway listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
