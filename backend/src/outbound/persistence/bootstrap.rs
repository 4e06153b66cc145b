//! Startup schema bootstrap.
//!
//! The service owns a single table, so instead of a migration history it
//! issues idempotent DDL once on startup.

use diesel_async::SimpleAsyncConnection;
use tracing::info;

use super::pool::{DbPool, PoolError};

/// DDL for the `robots` table. Safe to run repeatedly.
pub const ROBOTS_DDL: &str = "CREATE TABLE IF NOT EXISTS robots (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    type TEXT NOT NULL,
    year INTEGER NOT NULL
);";

/// Errors raised while bootstrapping the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaBootstrapError {
    /// No connection could be checked out.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The DDL statement failed.
    #[error("failed to create robots table: {message}")]
    Statement { message: String },
}

/// Create the `robots` table when it does not exist yet.
///
/// # Errors
///
/// Returns [`SchemaBootstrapError`] when no connection is available or the
/// statement fails.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), SchemaBootstrapError> {
    let mut conn = pool.get().await?;
    conn.batch_execute(ROBOTS_DDL)
        .await
        .map_err(|err| SchemaBootstrapError::Statement {
            message: err.to_string(),
        })?;
    info!("robots schema ready");
    Ok(())
}
