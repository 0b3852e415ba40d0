//! Cart persistence adapter

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::CartLine,
    persistence::{
        KeyValueStore, StorageError,
        codec::{self, CodecError},
    },
};

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "eshop_cart";

/// Errors raised while loading or saving a cart.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The key-value store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored bytes could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Saves and loads cart lines under one key of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CartPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartPersistence<S> {
    /// Persist under [`DEFAULT_CART_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CART_KEY)
    }

    /// Persist under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the stored cart.
    ///
    /// Absent data and data that cannot be decoded both produce an empty cart.
    pub fn load(&self) -> Vec<CartLine> {
        match self.try_load() {
            Ok(Some(lines)) => lines,
            Ok(None) => {
                debug!(key = %self.key, "no stored cart");

                Vec::new()
            }
            Err(error) => {
                warn!(key = %self.key, %error, "discarding unreadable stored cart");

                Vec::new()
            }
        }
    }

    /// Load the stored cart, telling absent data (`Ok(None)`) apart from corrupt data.
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if the store cannot be read or the bytes do not decode.
    pub fn try_load(&self) -> Result<Option<Vec<CartLine>>, PersistenceError> {
        let Some(bytes) = self.store.get(&self.key)? else {
            return Ok(None);
        };

        Ok(Some(codec::decode(&bytes)?))
    }

    /// Replace the stored cart with `lines`.
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if encoding or writing fails.
    pub fn save(&mut self, lines: &[CartLine]) -> Result<(), PersistenceError> {
        let bytes = codec::encode(lines)?;

        self.store.set(&self.key, &bytes)?;

        Ok(())
    }

    /// Delete the stored cart.
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if the store cannot remove the key.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)?;

        Ok(())
    }

    /// The key the cart is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        fixtures::demo_catalog,
        persistence::MemoryStore,
        products::ProductId,
    };

    use super::*;

    fn lines() -> Result<Vec<CartLine>, Box<dyn std::error::Error>> {
        let catalog = demo_catalog()?;

        [(3, 1), (6, 2)]
            .into_iter()
            .map(|(id, quantity)| {
                catalog
                    .get(ProductId::new(id))
                    .and_then(|product| CartLine::snapshot(product, quantity))
                    .ok_or_else(|| "missing product".into())
            })
            .collect()
    }

    #[test]
    fn load_without_stored_cart_is_empty() -> TestResult {
        let persistence = CartPersistence::new(MemoryStore::default());

        assert!(persistence.load().is_empty());
        assert!(persistence.try_load()?.is_none());
        assert_eq!(persistence.key(), DEFAULT_CART_KEY);

        Ok(())
    }

    #[test]
    fn save_then_load_round_trips() -> TestResult {
        let lines = lines()?;
        let mut persistence = CartPersistence::with_key(MemoryStore::default(), "session_cart");

        persistence.save(&lines)?;

        assert_eq!(persistence.load(), lines);
        assert!(persistence.store().get("session_cart")?.is_some());
        assert!(persistence.store().get(DEFAULT_CART_KEY)?.is_none());

        Ok(())
    }

    #[test]
    fn save_overwrites_previous_value() -> TestResult {
        let lines = lines()?;
        let mut persistence = CartPersistence::new(MemoryStore::default());

        persistence.save(&lines)?;
        persistence.save(lines.get(..1).ok_or("expected lines")?)?;

        assert_eq!(persistence.load().len(), 1);

        Ok(())
    }

    #[test]
    fn corrupt_value_loads_as_empty_but_try_load_reports_it() -> TestResult {
        let mut persistence = CartPersistence::new(MemoryStore::default());

        persistence.store_mut().set(DEFAULT_CART_KEY, b"]]not a cart[[")?;

        assert!(persistence.load().is_empty());
        assert!(matches!(
            persistence.try_load(),
            Err(PersistenceError::Codec(CodecError::Json(_)))
        ));

        Ok(())
    }

    #[test]
    fn clear_removes_stored_cart() -> TestResult {
        let mut persistence = CartPersistence::new(MemoryStore::default());

        persistence.save(&lines()?)?;
        persistence.clear()?;

        assert!(persistence.try_load()?.is_none());

        Ok(())
    }
}
