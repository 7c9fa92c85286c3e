use std::sync::Arc;

use axum::{routing::get, Router};
use mantic_api::Store;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod analytics;
pub mod comments;
pub mod db;
pub mod error;
pub mod feeds;
pub mod handlers;
mod query;

pub use error::Error;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub comments: comments::Comments,
}

/// The HTTP surface: one read-only aggregation endpoint. Every response
/// carries permissive CORS headers (any origin).
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v0/slug/:slug", get(handlers::market_by_slug))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
