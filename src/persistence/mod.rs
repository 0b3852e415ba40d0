//! Persistence
//!
//! A minimal key-value storage seam and the adapter that keeps a cart under a
//! single key in it.

use std::io;

use thiserror::Error;

mod adapter;
pub mod codec;
mod file;
mod memory;

pub use adapter::{CartPersistence, DEFAULT_CART_KEY, PersistenceError};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by key-value stores.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The key cannot be used with this store.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Device-local byte storage addressed by string keys.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the value cannot be written.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the value exists but cannot be removed.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
