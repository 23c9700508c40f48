//! Alias save acknowledgements.
//!
//! `POST /aliases/save` accepts an alias plus the level to persist it at
//! (`global` or `counterparty`). Durable persistence belongs to the
//! external alias store; this service records the request in an in-memory
//! sink and acknowledges it, preserving the wire contract.

use std::fmt;

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};

use recon_core::alias::Alias;

use super::AppState;
use crate::error::ApiError;

/// Persistence scope for a saved alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasLevel {
    /// Applies to every counterparty
    Global,
    /// Scoped to the alias's counterparty
    Counterparty,
}

impl fmt::Display for AliasLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasLevel::Global => write!(f, "global"),
            AliasLevel::Counterparty => write!(f, "counterparty"),
        }
    }
}

/// Request body for an alias save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasSaveRequest {
    /// The alias to persist
    pub alias: Alias,
    /// Persistence scope
    pub level: AliasLevel,
}

/// A recorded save request.
#[derive(Debug, Clone)]
pub struct SavedAlias {
    /// The alias as submitted
    pub alias: Alias,
    /// Requested scope
    pub level: AliasLevel,
}

/// Response body for an acknowledged save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasSaveResponse {
    pub success: bool,
    pub message: String,
    pub alias: Alias,
    pub level: AliasLevel,
}

/// Build the alias routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/aliases/save", post(save_handler))
}

/// POST /aliases/save - acknowledge an alias save request
async fn save_handler(
    State(state): State<AppState>,
    Json(request): Json<AliasSaveRequest>,
) -> Result<Json<AliasSaveResponse>, ApiError> {
    tracing::info!(
        source = %request.alias.source_name,
        target = %request.alias.target_name,
        level = %request.level,
        "saving alias"
    );

    state
        .saved_aliases
        .lock()
        .map_err(|_| ApiError::internal("Alias sink unavailable"))?
        .push(SavedAlias {
            alias: request.alias.clone(),
            level: request.level,
        });

    let response = AliasSaveResponse {
        success: true,
        message: format!("Alias saved at {} level", request.level),
        alias: request.alias,
        level: request.level,
    };
    Ok(Json(response))
}
