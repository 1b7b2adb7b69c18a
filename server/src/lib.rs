//! Depot Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - handlers: axum REST handlers

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod repository;

use repository::{DbState, FromConnection};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
}

impl AppState {
    pub fn new(db: DbState) -> Self {
        Self { db }
    }

    /// Build a repository over the shared connection
    pub fn repo<R: FromConnection>(&self) -> R {
        R::from_connection(self.db.conn.clone())
    }
}

/// CORS policy for the configured origins
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_DISPOSITION])
}

/// Build the full application router
pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(handlers::health_routes())
        .nest("/api", handlers::api_routes())
        .fallback(handlers::not_found)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
