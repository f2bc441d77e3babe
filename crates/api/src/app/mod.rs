//! HTTP API application wiring (Axum router + dependency wiring).
//!
//! Layout:
//! - `routes/`: route table + handlers
//! - `envelope.rs`: the `{success, data | error}` response wrapper
//! - `dto.rs`: response payloads
//! - `errors.rs`: handler errors mapped onto the error envelope

use axum::{Extension, Router};

use crate::context::DatabaseContext;
use crate::middleware;

pub mod dto;
pub mod envelope;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Middleware order on the way in: CORS, then request logging, then the
/// route table. Layers added later wrap earlier ones, so CORS goes last.
pub fn build_app(database: DatabaseContext) -> Router {
    routes::router()
        .layer(Extension(database))
        .layer(axum::middleware::from_fn(middleware::request_log))
        .layer(axum::middleware::from_fn(middleware::cors))
}
