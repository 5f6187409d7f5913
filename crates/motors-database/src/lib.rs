//! # motors-database
//!
//! Store traits for accounts and inventory, their PostgreSQL
//! implementations, and in-memory implementations for tests and
//! throwaway deployments.

pub mod memory;
pub mod pool;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use motors_core::config::{DatabaseBackend, DatabaseConfig};
use motors_core::result::AppResult;

pub use store::{AccountStore, InventoryStore};

/// The pair of stores every request handler works against.
#[derive(Clone)]
pub struct Stores {
    /// Credential store.
    pub accounts: Arc<dyn AccountStore>,
    /// Classification and inventory store.
    pub inventory: Arc<dyn InventoryStore>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

impl Stores {
    /// Builds the stores selected by `config.backend`.
    ///
    /// For PostgreSQL this opens the pool and, unless disabled, applies the
    /// embedded schema.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory stores; data will not survive a restart");
                Ok(Self::memory())
            }
            DatabaseBackend::Postgres => Ok(Self::postgres(pool::open(config).await?)),
        }
    }

    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            accounts: Arc::new(repositories::AccountRepository::new(pool.clone())),
            inventory: Arc::new(repositories::InventoryRepository::new(pool)),
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            accounts: Arc::new(memory::MemoryAccountStore::new()),
            inventory: Arc::new(memory::MemoryInventoryStore::new()),
        }
    }
}
