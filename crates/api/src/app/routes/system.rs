//! Liveness and dependency health checks.

use axum::{extract::Extension, http::StatusCode, response::Response};

use carrental_infra::ping_with_timeout;

use crate::app::dto::{DatabaseStatus, HealthStatus};
use crate::app::envelope;
use crate::app::errors::ApiError;
use crate::context::DatabaseContext;

/// `GET /health`: the process is up. No dependencies, never fails.
pub async fn health() -> Response {
    envelope::success(StatusCode::OK, Some(HealthStatus::ok()))
}

/// `GET /database-health`: one bounded ping against the injected database.
///
/// Not retried. Every failure (refused, auth, timeout) maps to the same 500.
pub async fn database_health(
    Extension(database): Extension<DatabaseContext>,
) -> Result<Response, ApiError> {
    if let Err(e) = ping_with_timeout(database.probe(), database.ping_timeout()).await {
        tracing::warn!(error = %e, "database health check failed");
        return Err(ApiError::DatabaseUnavailable);
    }

    Ok(envelope::success(StatusCode::OK, Some(DatabaseStatus::connected())))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::Router;
    use carrental_infra::{DatabaseError, DatabaseProbe};
    use tower::ServiceExt;

    use super::*;
    use crate::app::build_app;

    enum Behaviour {
        Up,
        Down,
        Hang,
    }

    struct FakeDb {
        behaviour: Behaviour,
        pings: AtomicUsize,
        /// Set when an in-flight ping future is dropped before finishing.
        abandoned: AtomicBool,
    }

    impl FakeDb {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                pings: AtomicUsize::new(0),
                abandoned: AtomicBool::new(false),
            })
        }
    }

    struct SetOnDrop<'a>(&'a AtomicBool);

    impl Drop for SetOnDrop<'_> {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait::async_trait]
    impl DatabaseProbe for FakeDb {
        async fn ping(&self) -> Result<(), DatabaseError> {
            self.pings.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Up => Ok(()),
                Behaviour::Down => Err(DatabaseError::Unreachable("connection refused".to_string())),
                Behaviour::Hang => {
                    let guard = SetOnDrop(&self.abandoned);
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    core::mem::forget(guard);
                    Ok(())
                }
            }
        }
    }

    fn app_with(db: Arc<FakeDb>) -> Router {
        build_app(DatabaseContext::new(db, Duration::from_secs(5)))
    }

    async fn get(app: Router, path: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok_and_stable() {
        let app = app_with(FakeDb::new(Behaviour::Down));

        let first = get(app.clone(), "/health").await;
        let second = get(app, "/health").await;

        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(first.1, r#"{"success":true,"data":{"status":"OK"}}"#);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn database_health_reports_success() {
        let db = FakeDb::new(Behaviour::Up);
        let (status, body) = get(app_with(db.clone()), "/database-health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            r#"{"success":true,"data":{"message":"database connection successful"}}"#
        );
        assert_eq!(db.pings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn database_health_reports_failure_without_retry() {
        let db = FakeDb::new(Behaviour::Down);
        let (status, body) = get(app_with(db.clone()), "/database-health").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"success":false,"error":"database connection failed"}"#);
        assert_eq!(db.pings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn database_health_times_out_as_failure() {
        let (status, body) = get(app_with(FakeDb::new(Behaviour::Hang)), "/database-health").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"success":false,"error":"database connection failed"}"#);
    }

    #[tokio::test]
    async fn dropped_request_cancels_the_ping() {
        let db = FakeDb::new(Behaviour::Hang);
        let app = app_with(db.clone());
        let started = std::time::Instant::now();

        let request = tokio::spawn(async move { get(app, "/database-health").await });
        while db.pings.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!db.abandoned.load(Ordering::SeqCst));

        request.abort();
        let err = request.await.unwrap_err();
        assert!(err.is_cancelled());

        assert!(db.abandoned.load(Ordering::SeqCst));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(db.pings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn wrong_method_on_known_path_gets_error_envelope() {
        for path in ["/health", "/database-health"] {
            let db = FakeDb::new(Behaviour::Up);
            let response = app_with(db.clone())
                .oneshot(Request::post(path).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(
                response.headers()[axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN],
                "*"
            );
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(
                bytes.as_ref(),
                br#"{"success":false,"error":"method not allowed"}"#
            );
            assert_eq!(db.pings.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn unknown_path_gets_error_envelope() {
        let (status, body) = get(app_with(FakeDb::new(Behaviour::Up)), "/cars").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"success":false,"error":"route not found"}"#);
    }
}
