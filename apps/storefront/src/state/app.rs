//! # App State
//!
//! Everything a command can touch: the session store, the catalog and the
//! configuration.
//!
//! ## Startup
//! ```text
//! AppConfig ──► open storage (file | memory)
//!           ──► load catalog (file | demo)
//!           ──► SessionStore::with_policy(storage, config.shipping_policy())
//!           ──► restore_session()
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use shopfinity_core::{ProductId, ProductRecord};
use shopfinity_store::{
    FileStorage, MemoryStorage, RestoreOutcome, SessionStore, Storage, StorageError, StoreResult,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::demo::demo_catalog;
use crate::state::config::{AppConfig, DataLocation};

/// Number of products in the fallback catalog.
const DEMO_CATALOG_SIZE: usize = 20;

/// Session storage chosen at runtime.
pub type DynStorage = Box<dyn Storage>;

/// Startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Could not open storage: {0}")]
    Storage(#[from] StorageError),

    #[error("Could not read catalog {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog {} is not a product list: {source}", path.display())]
    CatalogFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Shared application state.
pub struct AppState {
    config: AppConfig,
    store: SessionStore<DynStorage>,
    catalog: Vec<ProductRecord>,
    restored: RestoreOutcome,
}

impl AppState {
    /// Opens storage and the catalog from `config` and restores the session.
    pub fn open(config: AppConfig) -> Result<Self, StartupError> {
        let storage: DynStorage = match &config.data {
            DataLocation::Memory => {
                info!("Using in-memory storage");
                Box::new(MemoryStorage::new())
            }
            DataLocation::File(path) => {
                info!(path = %path.display(), "Using file storage");
                Box::new(FileStorage::open(path)?)
            }
        };

        let catalog = match &config.catalog_path {
            Some(path) => load_catalog(path)?,
            None => demo_catalog(DEMO_CATALOG_SIZE),
        };

        Ok(Self::with_parts(config, storage, catalog))
    }

    /// Builds the state from ready parts and restores the session.
    pub fn with_parts(config: AppConfig, storage: DynStorage, catalog: Vec<ProductRecord>) -> Self {
        let mut store = SessionStore::with_policy(storage, config.shipping_policy());
        let restored = store.restore_session();

        match &restored {
            RestoreOutcome::Restored { user } => info!(user_id = %user.id, "Resumed session"),
            RestoreOutcome::Anonymous => info!("Starting signed out"),
            RestoreOutcome::Recovered { key } => {
                warn!(key = %key, "Stored session was unreadable, starting signed out")
            }
        }

        info!(products = catalog.len(), "Catalog ready");
        AppState {
            config,
            store,
            catalog,
            restored,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &SessionStore<DynStorage> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SessionStore<DynStorage> {
        &mut self.store
    }

    pub fn catalog(&self) -> &[ProductRecord] {
        &self.catalog
    }

    pub fn product(&self, id: ProductId) -> Option<&ProductRecord> {
        self.catalog.iter().find(|p| p.id == id)
    }

    /// What the startup restore found.
    pub fn restored(&self) -> &RestoreOutcome {
        &self.restored
    }

    /// Flushes the session and releases storage.
    pub fn close(self) -> StoreResult<()> {
        self.store.close()?;
        info!("Storefront state closed");
        Ok(())
    }
}

fn load_catalog(path: &Path) -> Result<Vec<ProductRecord>, StartupError> {
    let contents = fs::read_to_string(path).map_err(|source| StartupError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| StartupError::CatalogFormat {
        path: path.to_path_buf(),
        source,
    })
}
