//! Health monitoring response types.

use serde::{Deserialize, Serialize};

/// Response returned by the liveness probe.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall service status.
    pub status: String,
    /// Maximum size of the store connection pool.
    pub pool_max_size: usize,
    /// Connections currently available in the pool.
    pub pool_available: usize,
}
