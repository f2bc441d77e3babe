use axum::{routing::get, Router};

pub mod system;

/// Route table. Fixed at startup.
///
/// Unmatched paths hit the 404 fallback; a known path with the wrong method
/// gets the 405 envelope instead of axum's empty default.
pub fn router() -> Router {
    Router::new()
        .route(
            "/health",
            get(system::health).fallback(system::method_not_allowed),
        )
        .route(
            "/database-health",
            get(system::database_health).fallback(system::method_not_allowed),
        )
        .fallback(system::not_found)
}
