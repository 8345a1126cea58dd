//! Shared state for the HTTP handlers

use std::sync::Arc;

use crate::players::PlayerService;
use crate::store::PlayerStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Player operations
    pub players: PlayerService,
    /// Service name reported by the health endpoint
    pub name: String,
}

impl AppState {
    pub fn new(store: Arc<dyn PlayerStore>, name: &str) -> Self {
        Self {
            players: PlayerService::new(store),
            name: name.to_string(),
        }
    }
}
