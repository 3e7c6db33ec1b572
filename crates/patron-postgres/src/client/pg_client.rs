//! Pooled client for the credential store.

use std::fmt;
use std::sync::Arc;

use deadpool::managed::{Hook, Pool};
use derive_more::{Deref, DerefMut};
use diesel_async::AsyncConnection;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::scoped_futures::ScopedBoxFuture;

use super::{custom_hooks, migrate};
use crate::{
    ConnectionPool, PgConfig, PgError, PgResult, PooledConnection, TRACING_TARGET_CONNECTION,
};

/// Snapshot of the connection pool state.
#[derive(Debug, Clone)]
pub struct PgPoolStatus {
    /// Maximum number of connections the pool may hold.
    pub max_size: usize,
    /// Connections currently held by the pool.
    pub size: usize,
    /// Connections available for checkout.
    pub available: usize,
    /// Requests currently waiting for a connection.
    pub waiting: usize,
}

/// Handle to the credential store.
///
/// Cheap to clone; all clones share one connection pool. Connections are
/// opened lazily on first checkout, so constructing a client never touches
/// the network.
#[derive(Clone)]
pub struct PgClient {
    inner: Arc<PgClientInner>,
}

struct PgClientInner {
    pool: ConnectionPool,
    config: PgConfig,
}

impl PgClient {
    /// Builds the connection pool described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be constructed from the given
    /// settings. Connection failures surface later, on first checkout.
    pub fn new(config: PgConfig) -> PgResult<Self> {
        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            database_url = %config.database_url_masked(),
            max_connections = config.postgres_max_connections,
            "initializing credential store client"
        );

        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup = Box::new(custom_hooks::setup_callback);
        let manager =
            AsyncDieselConnectionManager::new_with_config(&config.postgres_url, manager_config);

        let pool = Pool::builder(manager)
            .max_size(config.postgres_max_connections as usize)
            .wait_timeout(config.connection_timeout())
            .create_timeout(config.connection_timeout())
            .recycle_timeout(config.idle_timeout())
            .runtime(deadpool::Runtime::Tokio1)
            .post_create(Hook::sync_fn(custom_hooks::post_create))
            .pre_recycle(Hook::sync_fn(custom_hooks::pre_recycle))
            .post_recycle(Hook::sync_fn(custom_hooks::post_recycle))
            .build()
            .map_err(|e| {
                PgError::Unexpected(format!("failed to build connection pool: {e}").into())
            })?;

        Ok(Self {
            inner: Arc::new(PgClientInner { pool, config }),
        })
    }

    /// Checks a connection out of the pool.
    ///
    /// Waits up to the configured connection timeout for a free slot.
    /// The returned [`PgConn`] goes back to the pool on drop.
    pub async fn get_connection(&self) -> PgResult<PgConn> {
        let conn = self.inner.pool.get().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                error = %e,
                "connection checkout failed"
            );
            PgError::from(e)
        })?;

        Ok(PgConn::new(conn))
    }

    /// Applies any embedded migrations not yet present in the database.
    ///
    /// Safe to call on every startup; an up-to-date schema is a no-op.
    pub async fn run_pending_migrations(&self) -> PgResult<Vec<String>> {
        let conn = self.inner.pool.get().await.map_err(PgError::from)?;
        migrate::run_pending_migrations(conn).await
    }

    /// Returns a snapshot of the pool state, for the liveness probe.
    #[inline]
    pub fn pool_status(&self) -> PgPoolStatus {
        let status = self.inner.pool.status();
        PgPoolStatus {
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }
}

impl fmt::Debug for PgClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.pool_status();
        f.debug_struct("PgClient")
            .field("database_url", &self.inner.config.database_url_masked())
            .field("pool_max_size", &status.max_size)
            .field("pool_available", &status.available)
            .field("pool_waiting", &status.waiting)
            .finish()
    }
}

/// A connection checked out of the pool.
///
/// Dereferences to the underlying async connection, so the repository
/// traits (e.g. [`CustomerRepository`]) apply directly. Dropping the
/// wrapper returns the connection to the pool.
///
/// ```ignore
/// let mut conn = pg_client.get_connection().await?;
/// let customer = conn.find_customer_by_id(customer_id).await?;
/// ```
///
/// [`CustomerRepository`]: crate::query::CustomerRepository
#[derive(Deref, DerefMut)]
pub struct PgConn {
    #[deref]
    #[deref_mut]
    conn: PooledConnection,
}

impl PgConn {
    /// Wraps a pooled connection.
    pub fn new(conn: PooledConnection) -> Self {
        Self { conn }
    }

    /// Runs `f` inside a database transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back when it returns `Err`.
    pub async fn transaction<'a, T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: for<'r> FnOnce(&'r mut PooledConnection) -> ScopedBoxFuture<'a, 'r, Result<T, E>>
            + Send
            + 'a,
        T: Send + 'a,
        E: From<diesel::result::Error> + Send + 'a,
    {
        self.conn.transaction(f).await
    }
}

impl fmt::Debug for PgConn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgConn").finish_non_exhaustive()
    }
}
