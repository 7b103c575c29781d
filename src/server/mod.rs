//! JSON endpoint for the web front-end.

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use parking_lot::RwLock;
use tokio::net::TcpListener;

use crate::error::ServerError;
use crate::history::RecentSearches;
use crate::http_probe::probe::Prober;

#[derive(Debug, Clone)]
pub struct AppState {
    pub prober: Prober,
    /// Sites checked through this server, shared by every request
    pub recent_searches: Arc<RwLock<RecentSearches>>,
}

impl AppState {
    pub fn new(prober: Prober) -> Self {
        Self {
            prober,
            recent_searches: Arc::default(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/check-status", post(handlers::check_status))
        .route("/api/recent-searches", get(handlers::recent_searches))
        .with_state(state)
}

/// Bind `listen_addr` and serve until the process stops.
pub async fn serve(listen_addr: &str, state: AppState) -> Result<(), ServerError> {
    let addr: SocketAddr = listen_addr
        .parse()
        .map_err(|_| ServerError::InvalidAddress(listen_addr.to_string()))?;

    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    run(listener, state).await
}

/// Serve on an already bound listener.
pub async fn run(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
