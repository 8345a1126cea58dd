//! HTTP handlers for the player REST API

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;

use super::state::AppState;
use crate::players::{Player, PlayerError, PlayerFields, PlayerQuery};

// Malformed query strings and bodies get the same bare 400 as any other bad value

fn query_params(
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> Result<PlayerQuery, PlayerError> {
    query
        .map(|Query(q)| q)
        .map_err(|_| PlayerError::invalid("query"))
}

fn body_fields(body: Result<Json<PlayerFields>, JsonRejection>) -> Result<PlayerFields, PlayerError> {
    body.map(|Json(f)| f).map_err(|_| PlayerError::invalid("body"))
}

/// GET /rest/players
pub async fn list_players(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> Result<Json<Vec<Player>>, PlayerError> {
    let query = query_params(query)?;
    state.players.list(&query).await.map(Json)
}

/// GET /rest/players/count
pub async fn count_players(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> Result<Json<u64>, PlayerError> {
    let query = query_params(query)?;
    state.players.count(&query).await.map(Json)
}

/// GET /rest/players/:id
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Player>, PlayerError> {
    state.players.get(&id).await.map(Json)
}

/// DELETE /rest/players/:id
pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(), PlayerError> {
    state.players.delete(&id).await
}

/// POST /rest/players
pub async fn create_player(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PlayerFields>, JsonRejection>,
) -> Result<Json<Player>, PlayerError> {
    let fields = body_fields(body)?;
    state.players.create(&fields).await.map(Json)
}

/// POST /rest/players/:id
pub async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<PlayerFields>, JsonRejection>,
) -> Result<Json<Player>, PlayerError> {
    let fields = body_fields(body)?;
    state.players.update(&id, &fields).await.map(Json)
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": state.name
    }))
}
