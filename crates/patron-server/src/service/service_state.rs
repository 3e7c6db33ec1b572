//! Application state and dependency injection.

use patron_cloudinary::CloudinaryClient;
use patron_postgres::PgClient;

use crate::service::auth::{AuthHasher, TokenKeys};
use crate::service::{Result, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pg_client: PgClient,
    image_client: CloudinaryClient,

    auth_hasher: AuthHasher,
    token_keys: TokenKeys,
}

impl ServiceState {
    /// Creates application state from already-constructed collaborators.
    pub fn new(
        pg_client: PgClient,
        image_client: CloudinaryClient,
        auth_hasher: AuthHasher,
        token_keys: TokenKeys,
    ) -> Self {
        Self {
            pg_client,
            image_client,
            auth_hasher,
            token_keys,
        }
    }

    /// Initializes application state from configuration.
    ///
    /// Connects to the credential store (running migrations) and constructs
    /// all collaborators.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self::new(
            config.connect_postgres().await?,
            config.create_image_client()?,
            config.create_password_hasher(),
            config.token_keys(),
        ))
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(pg_client: PgClient);
impl_di!(image_client: CloudinaryClient);

impl_di!(auth_hasher: AuthHasher);
impl_di!(token_keys: TokenKeys);
