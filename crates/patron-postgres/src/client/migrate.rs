//! Embedded migration runner.
//!
//! `diesel_migrations` is synchronous, so the run is moved onto a blocking
//! thread behind [`AsyncConnectionWrapper`].

use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgError, PgResult, PooledConnection, TRACING_TARGET_MIGRATION};

/// Applies all pending migrations, returning the versions that ran.
pub async fn run_pending_migrations(conn: PooledConnection) -> PgResult<Vec<String>> {
    let started = Instant::now();
    let mut conn: AsyncConnectionWrapper<_> = conn.into();

    let outcome = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS).map(|versions| {
            versions
                .into_iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
        })
    })
    .await
    .map_err(|join_err| PgError::Migration(join_err.into()))?;

    match outcome {
        Ok(versions) => {
            tracing::info!(
                target: TRACING_TARGET_MIGRATION,
                elapsed = ?started.elapsed(),
                applied = versions.len(),
                "schema is up to date"
            );
            Ok(versions)
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                elapsed = ?started.elapsed(),
                error = %err,
                "migration run failed"
            );
            Err(PgError::Migration(err))
        }
    }
}
