//! Infrastructure layer: configuration and database wiring.

pub mod config;
pub mod db;

pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use db::{DatabaseError, DatabaseProbe, PgDatabase, ping_with_timeout};
