//! Connection lifecycle hooks for the pool manager.
//!
//! The setup callback instruments every connection the pool opens; the
//! create/recycle hooks trace pool churn. None of the hooks ever fail a
//! connection themselves.

use std::time::Instant;

use deadpool::managed::{HookResult, Metrics};
use diesel::ConnectionResult;
use diesel_async::pooled_connection::{PoolError, PoolableConnection};
use diesel_async::{AsyncConnection, AsyncPgConnection};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::TRACING_TARGET_CONNECTION;

use super::mask_database_url;

/// Establishes a new database connection, logging the outcome and duration.
///
/// Installed as the manager's custom setup via [`ManagerConfig`].
///
/// [`ManagerConfig`]: diesel_async::pooled_connection::ManagerConfig
pub fn setup_callback<C>(addr: &str) -> BoxFuture<'_, ConnectionResult<C>>
where
    C: AsyncConnection + 'static,
{
    let started = Instant::now();
    let masked_addr = mask_database_url(addr);

    async move {
        let result = C::establish(addr).await;

        match &result {
            Ok(_) => tracing::info!(
                target: TRACING_TARGET_CONNECTION,
                addr = %masked_addr,
                elapsed_ms = started.elapsed().as_millis(),
                "database connection established"
            ),
            Err(err) => tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                addr = %masked_addr,
                elapsed_ms = started.elapsed().as_millis(),
                error = %err,
                "database connection failed"
            ),
        }

        result
    }
    .boxed()
}

/// Traces a freshly created connection entering the pool.
pub fn post_create(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    if conn.is_broken() {
        tracing::warn!(
            target: TRACING_TARGET_CONNECTION,
            hook = "post_create",
            "connection is broken immediately after creation"
        );
    } else {
        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            hook = "post_create",
            created_at = ?metrics.created,
            "connection added to pool"
        );
    }

    Ok(())
}

/// Traces a connection about to be recycled.
pub fn pre_recycle(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    tracing::debug!(
        target: TRACING_TARGET_CONNECTION,
        hook = "pre_recycle",
        is_broken = conn.is_broken(),
        recycle_count = metrics.recycle_count,
        "recycling connection"
    );

    Ok(())
}

/// Traces a connection returned to the pool after recycling.
pub fn post_recycle(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    tracing::debug!(
        target: TRACING_TARGET_CONNECTION,
        hook = "post_recycle",
        is_broken = conn.is_broken(),
        recycle_count = metrics.recycle_count,
        "connection returned to pool"
    );

    Ok(())
}
