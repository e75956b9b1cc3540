//! Pick the storage backend named by the configuration.
//!
//! Priority for `Auto`: localStorage → Memory (fallback)

use std::rc::Rc;
use nova_core::ports::StoragePort;
use nova_types::config::{StorageBackendType, StorageConfig};
use super::{LocalStorage, MemoryStorage};

/// Returns a trait object so callers are backend-agnostic.
/// Never fails: an unusable localStorage degrades to memory with a warning.
pub fn auto_detect_storage(config: &StorageConfig) -> Rc<dyn StoragePort> {
    if config.backend == StorageBackendType::Memory {
        log::info!("Storage backend: memory (configured)");
        return Rc::new(MemoryStorage::new());
    }

    match LocalStorage::open().and_then(|local| local.probe().map(|_| local)) {
        Ok(local) => {
            log::info!("Storage backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
