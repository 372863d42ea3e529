//! HTTP API for the SMS relay.

mod handlers;
mod types;

pub use handlers::*;
pub use types::*;

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use beem_client::{BeemClient, BeemError};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Beem SMS client
    pub beem: Arc<BeemClient>,
}

impl AppState {
    /// Create new application state.
    pub fn new(beem: BeemClient) -> Self {
        Self {
            beem: Arc::new(beem),
        }
    }

    /// Build state from startup configuration.
    pub fn from_config(config: &Config) -> Result<Self, BeemError> {
        Ok(Self::new(config.beem_client()?))
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/api/send-sms", post(handlers::send_sms))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
