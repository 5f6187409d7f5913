//! PostgreSQL pool for the account and inventory tables.

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use motors_core::config::DatabaseConfig;
use motors_core::error::{AppError, ErrorKind};

/// Schema for `account`, `classification` and `inventory`.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens the pool described by `config` and, when `run_migrations` is set,
/// brings the schema up to date before any store touches it.
pub async fn open(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    info!(
        url = %redact_credentials(&config.url),
        max_connections = config.max_connections,
        "Opening inventory database"
    );

    let pool = pool_options(config)
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Inventory database is unreachable", e)
        })?;

    if config.run_migrations {
        MIGRATOR.run(&pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Schema migration failed", e)
        })?;
        info!(applied = MIGRATOR.iter().count(), "Schema is current");
    }

    Ok(pool)
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// Keeps scheme, user, host and database; drops the password.
fn redact_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((credentials, location)) => {
            let user = credentials
                .split_once(':')
                .map_or(credentials, |(user, _)| user);
            format!("{scheme}://{user}@{location}")
        }
        None => url.to_string(),
    }
}
