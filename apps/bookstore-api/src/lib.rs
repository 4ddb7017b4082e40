//! # bookstore-api: HTTP Catalog Server
//!
//! Serves the paged catalog over JSON. The cart is not here: it lives in
//! each client's local store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog API Server                               │
//! │                                                                         │
//! │  Client ───► HTTP (5071) ───► routes ───► BookRepository ───► SQLite   │
//! │                 │                                                       │
//! │                 ├── TraceLayer (request spans)                         │
//! │                 └── CorsLayer  (any origin)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use bookstore_db::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Arc<Self> {
        Arc::new(AppState { db })
    }
}

/// Creates the router with all routes and shared state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/books", get(routes::books::list))
        .route("/api/books/{id}", get(routes::books::get))
        .route("/api/categories", get(routes::books::categories))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
