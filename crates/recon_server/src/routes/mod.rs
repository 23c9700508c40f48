//! Route modules for the reconciliation server
//!
//! This module contains endpoint group-specific routers:
//! - process: the reconciliation batch endpoint
//! - aliases: alias save acknowledgements
//! - health: health check and monitoring endpoints

pub mod aliases;
pub mod health;
pub mod process;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use recon_core::alias::AliasBook;

use crate::config::ServerConfig;
use aliases::SavedAlias;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// The alias store snapshot used for every batch
    pub alias_book: Arc<AliasBook>,
    /// In-memory sink for acknowledged alias saves
    pub saved_aliases: Arc<Mutex<Vec<SavedAlias>>>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>, alias_book: Arc<AliasBook>) -> Self {
        Self {
            config,
            alias_book,
            saved_aliases: Arc::new(Mutex::new(Vec::new())),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>, alias_book: Arc<AliasBook>) -> Router {
    let max_upload = config.max_upload_bytes;
    let state = AppState::new(config, alias_book);

    Router::new()
        .merge(health::routes())
        .merge(process::routes())
        .merge(aliases::routes())
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
