use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::types::PlayerId;

/// Errors surfaced by the player service
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Malformed or out-of-range input. The field name is for logs only and
    /// never reaches the client.
    #[error("invalid value for {field}")]
    InvalidValue { field: &'static str },

    #[error("player {0} not found")]
    NotFound(PlayerId),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl PlayerError {
    pub fn invalid(field: &'static str) -> Self {
        PlayerError::InvalidValue { field }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PlayerError::InvalidValue { .. } => StatusCode::BAD_REQUEST,
            PlayerError::NotFound(_) => StatusCode::NOT_FOUND,
            PlayerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PlayerError {
    fn into_response(self) -> Response {
        match &self {
            PlayerError::InvalidValue { field } => {
                tracing::debug!("Rejected request: invalid {}", field)
            }
            PlayerError::NotFound(id) => tracing::debug!("Player {} not found", id),
            PlayerError::Storage(e) => tracing::error!("Store failure: {:#}", e),
        }
        self.status().into_response()
    }
}
