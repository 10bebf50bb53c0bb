// src/store.rs

use crate::config::LoaderConfig;
use crate::load::{load, LoadError, Loaded};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Holds the current dataset snapshot. Readers get an `Arc` that stays
/// valid and unchanged even if a reload swaps in a new snapshot.
pub struct DatasetStore {
    config: LoaderConfig,
    current: RwLock<Arc<Loaded>>,
}

impl DatasetStore {
    /// Load once per `config`.
    pub fn open(config: LoaderConfig) -> Result<Self, LoadError> {
        let loaded = load(&config)?;
        Ok(Self::from_loaded(config, loaded))
    }

    /// Wrap an already-built snapshot.
    pub fn from_loaded(config: LoaderConfig, loaded: Loaded) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(loaded)),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Arc<Loaded> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Re-read the source from scratch and replace the snapshot wholesale.
    /// On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<Loaded>, LoadError> {
        let fresh = match load(&self.config) {
            Ok(l) => Arc::new(l),
            Err(e) => {
                warn!("reload failed, keeping previous data: {}", e);
                return Err(e);
            }
        };
        info!(records = fresh.dataset.len(), source = %fresh.source_name, "dataset reloaded");
        let mut guard = match self.current.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::clone(&fresh);
        Ok(fresh)
    }
}
