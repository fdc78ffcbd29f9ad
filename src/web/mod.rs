// SPDX-License-Identifier: MPL-2.0
//! HTTP surface of the site.
//!
//! - `GET /` renders the home page
//! - `GET /projects` renders the localized project list
//! - anything else is looked up in the embedded static files, then answered
//!   with a localized 404 page

pub mod assets;
pub mod handlers;
pub mod render;
mod state;

pub use render::{HtmlRenderer, PageContext, Renderer};
pub use state::AppState;

use crate::error::{Error, Result};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/projects", get(handlers::projects))
        .fallback(handlers::fallback)
        .with_state(state)
}

/// Binds `address` and serves until Ctrl-C.
pub async fn serve(state: Arc<AppState>, address: &str) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|err| Error::Server(format!("failed to bind {}: {}", address, err)))?;
    let local = listener.local_addr()?;
    tracing::info!("Server listening on http://{}", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| Error::Server(err.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
