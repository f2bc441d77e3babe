use std::sync::Arc;

use anyhow::Context;
use carrental_api::{app::build_app, context::DatabaseContext};
use carrental_infra::{AppConfig, DatabaseConfig, PgDatabase, ping_with_timeout};
use carrental_observability::LogFormat;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = AppConfig::load().context("load config")?;
    carrental_observability::init(LogFormat::for_env(&app_config.env));

    let db_config = DatabaseConfig::load().context("load database config")?;
    let db = PgDatabase::connect_lazy(&db_config);
    ping_with_timeout(&db, db_config.ping_timeout)
        .await
        .with_context(|| format!("database connection failed ({})", db_config.addr()))?;
    tracing::info!(addr = %db_config.addr(), database = %db_config.database, "database connection established");

    let app = build_app(DatabaseContext::new(Arc::new(db), db_config.ping_timeout));

    let addr = ("0.0.0.0", app_config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind 0.0.0.0:{}", app_config.port))?;

    tracing::info!(env = %app_config.env, "listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
