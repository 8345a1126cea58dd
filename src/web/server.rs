//! Web server setup and routing

use anyhow::Context;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers;
use super::state::AppState;
use crate::cli::ServiceConfig;
use crate::store::MemoryStore;

/// Build the REST router without any middleware
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/rest/health", get(handlers::health))
        .route(
            "/rest/players",
            get(handlers::list_players).post(handlers::create_player),
        )
        .route("/rest/players/count", get(handlers::count_players))
        .route(
            "/rest/players/:id",
            get(handlers::get_player)
                .post(handlers::update_player)
                .delete(handlers::delete_player),
        )
        .with_state(state)
}

/// Start the player REST service
pub async fn start_server(config: ServiceConfig) -> anyhow::Result<()> {
    let store = MemoryStore::new();

    if let Some(seed) = &config.seed_file {
        if let Err(e) = store.load_seed(seed).await {
            warn!("Failed to load seed players: {:#}", e);
        }
    }

    let state = Arc::new(AppState::new(Arc::new(store), &config.name));
    let mut app = router(state).layer(TraceLayer::new_for_http());

    if config.cors.enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .context(format!("Invalid bind address: {}:{}", config.bind, config.port))?;
    info!("Starting {} on http://{}", config.name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
