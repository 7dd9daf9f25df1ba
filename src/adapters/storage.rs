//! In-memory key-value storage adapter.
//!
//! Implements both [`StoragePort`] and [`ConfigPort`].  Keys are namespaced
//! (`namespace::key`) so each subsystem owns its own slice of the store.
//! Values are capped at [`MAX_BLOB_SIZE`] bytes, mirroring the slot limit of
//! flash-backed stores.

use std::collections::HashMap;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::SecurityConfig;

const CONFIG_NAMESPACE: &str = "homealarm";
const CONFIG_KEY: &str = "seccfg";

/// Largest value a single key can hold.
pub const MAX_BLOB_SIZE: usize = 4000;

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    store: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        info!("MemoryStorage: simulation backend");
        Self::default()
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    /// Drop every key in `namespace`.
    pub fn erase_namespace(&mut self, namespace: &str) {
        let prefix = format!("{}::", namespace);
        self.store.retain(|k, _| !k.starts_with(&prefix));
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        match self.store.get(&Self::composite_key(namespace, key)) {
            Some(v) => {
                let n = v.len().min(buf.len());
                buf[..n].copy_from_slice(&v[..n]);
                Ok(n)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        if data.len() > MAX_BLOB_SIZE {
            return Err(StorageError::Full);
        }
        self.store
            .insert(Self::composite_key(namespace, key), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&Self::composite_key(namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store
            .contains_key(&Self::composite_key(namespace, key))
    }
}

impl ConfigPort for MemoryStorage {
    fn load(&self) -> Result<SecurityConfig, ConfigError> {
        let key = Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY);
        if let Some(bytes) = self.store.get(&key) {
            let cfg: SecurityConfig =
                postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
            info!("MemoryStorage: loaded config from store");
            Ok(cfg)
        } else {
            info!("MemoryStorage: no stored config, using defaults");
            Ok(SecurityConfig::default())
        }
    }

    fn save(&mut self, config: &SecurityConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.write(CONFIG_NAMESPACE, CONFIG_KEY, &bytes)
            .map_err(|_| ConfigError::IoError)?;
        info!("MemoryStorage: config saved");
        Ok(())
    }
}
