//! Database adapters (connection pool + connectivity probe).
//!
//! The HTTP layer only needs to know whether the database answers, so it
//! depends on [`DatabaseProbe`] rather than on `sqlx` directly. Repositories
//! added later borrow the pool through [`PgDatabase::pool`].

use std::time::Duration;

use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

const MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("database unreachable: {0}")]
    Unreachable(String),

    #[error("database did not answer within {0:?}")]
    Timeout(Duration),
}

/// Connectivity check against a database.
///
/// Implementations must be safe to call concurrently from many requests.
#[async_trait::async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Run `probe.ping()` bounded by `timeout`.
///
/// The probe future is dropped when the deadline passes, or when the caller's
/// own future is dropped (e.g. the client went away).
pub async fn ping_with_timeout(
    probe: &dyn DatabaseProbe,
    timeout: Duration,
) -> Result<(), DatabaseError> {
    match tokio::time::timeout(timeout, probe.ping()).await {
        Ok(result) => result,
        Err(_elapsed) => Err(DatabaseError::Timeout(timeout)),
    }
}

/// Postgres pool shared by the whole process.
///
/// `PgPool` is internally reference-counted; cloning is cheap and all clones
/// share connections.
#[derive(Debug, Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    /// Build the pool without opening a connection yet.
    ///
    /// Connections are established on first use; call [`DatabaseProbe::ping`]
    /// to find out whether the server is reachable.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(config.ping_timeout)
            .connect_lazy_with(options);

        tracing::debug!(
            addr = %config.addr(),
            database = %config.database,
            "postgres pool configured"
        );

        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl DatabaseProbe for PgDatabase {
    async fn ping(&self) -> Result<(), DatabaseError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DatabaseError::Unreachable(e.to_string()))?;

        conn.ping()
            .await
            .map_err(|e| DatabaseError::Unreachable(e.to_string()))
    }
}
