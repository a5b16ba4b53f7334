//! # Liveness Endpoint
//!
//! A single `GET /` page the hosting platform polls to decide the process is
//! alive. It runs as its own task and shares nothing mutable with the bot.

use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub fn router(body: String) -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .with_state(Arc::<str>::from(body))
}

async fn liveness_handler(State(body): State<Arc<str>>) -> (StatusCode, String) {
    (StatusCode::OK, body.to_string())
}

/// Serve the liveness page on an already bound listener
pub async fn serve(listener: TcpListener, body: String) -> Result<()> {
    axum::serve(listener, router(body)).await?;
    Ok(())
}

/// Start the liveness page in the background on `0.0.0.0:port`.
///
/// Bind or serve failures are logged; the bot keeps running without it.
pub fn spawn(port: u16, body: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(%addr, error = %e, "Failed to bind liveness endpoint");
                return;
            }
        };
        info!(%addr, "Liveness endpoint listening");
        if let Err(e) = serve(listener, body).await {
            error!(error = %e, "Liveness endpoint stopped");
        }
    })
}
