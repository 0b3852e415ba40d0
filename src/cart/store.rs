//! Cart Store
//!
//! The only writer of cart state. Every successful mutation is flushed to the
//! persistence adapter and then announced to observers, so a caller may
//! re-render from the store as soon as a mutating call returns.
//!
//! The plain operations (`add_item`, `update_quantity`, `remove_item`) never
//! fail: unknown products and missing lines are ignored and storage failures
//! are logged. The `try_*` variants report the same outcomes as [`CartError`].

use std::{fmt, sync::Arc};

use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::{
        line::CartLine,
        observer::{CartChange, CartObserver, ChangeKind, ObserverKey},
    },
    catalog::Catalog,
    persistence::{CartPersistence, KeyValueStore, MemoryStore, PersistenceError},
    pricing::{PricingError, to_money, total_price},
    products::ProductId,
};

/// Errors reported by the strict cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product id is not in the catalog.
    #[error("Product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// A new line cannot start with a non-positive quantity.
    #[error("Cannot add product {product} with quantity {quantity}")]
    InvalidQuantity {
        /// Product that was being added
        product: ProductId,
        /// Requested quantity
        quantity: i64,
    },

    /// The mutation was applied and announced but could not be saved.
    #[error("Cart updated but not saved: {source}")]
    Persistence {
        /// The change that was applied
        change: CartChange,
        /// Why the flush failed
        #[source]
        source: PersistenceError,
    },
}

/// Owns the cart lines for one storefront session.
pub struct CartStore<S: KeyValueStore = MemoryStore> {
    catalog: Arc<Catalog>,
    persistence: CartPersistence<S>,
    lines: Vec<CartLine>,
    observers: SlotMap<ObserverKey, Box<dyn CartObserver>>,
}

impl CartStore<MemoryStore> {
    /// Open an empty store backed by a fresh in-memory key-value store.
    pub fn in_memory(catalog: Arc<Catalog>) -> Self {
        Self::open(catalog, CartPersistence::new(MemoryStore::default()))
    }
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open a store, hydrating it from whatever the adapter has persisted.
    ///
    /// Missing or unreadable data yields an empty cart.
    pub fn open(catalog: Arc<Catalog>, persistence: CartPersistence<S>) -> Self {
        let lines = persistence.load();

        info!(
            key = persistence.key(),
            lines = lines.len(),
            "cart hydrated"
        );

        Self {
            catalog,
            persistence,
            lines,
            observers: SlotMap::with_key(),
        }
    }

    /// Register an observer for all subsequent mutations.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) -> ObserverKey {
        self.observers.insert(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, key: ObserverKey) -> bool {
        self.observers.remove(key).is_some()
    }

    /// Add one unit of a product.
    pub fn add_one(&mut self, id: ProductId) {
        self.add_item(id, 1);
    }

    /// Add `quantity` units of a catalog product, ignoring unknown ids.
    ///
    /// An existing line has its quantity adjusted (and is removed if that
    /// leaves it at zero or below); otherwise a new line is appended.
    pub fn add_item(&mut self, id: ProductId, quantity: i64) {
        let outcome = self.try_add_item(id, quantity);

        log_outcome("add_item", outcome);
    }

    /// Adjust a line's quantity by `delta`, removing it at zero or below.
    /// Products not in the cart are ignored.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) {
        let outcome = self.try_update_quantity(id, delta);

        log_outcome("update_quantity", outcome);
    }

    /// Remove a product's line, if present.
    pub fn remove_item(&mut self, id: ProductId) {
        let outcome = self.try_remove_item(id);

        log_outcome("remove_item", outcome);
    }

    /// Strict form of [`CartStore::add_item`].
    ///
    /// # Errors
    ///
    /// - [`CartError::UnknownProduct`]: the id is not in the catalog; nothing changed.
    /// - [`CartError::InvalidQuantity`]: a new line would start at zero or below; nothing changed.
    /// - [`CartError::Persistence`]: the change was applied but not saved.
    pub fn try_add_item(&mut self, id: ProductId, quantity: i64) -> Result<CartChange, CartError> {
        if !self.catalog.contains(id) {
            return Err(CartError::UnknownProduct(id));
        }

        let (kind, new_quantity) = if self.line(id).is_some() {
            self.apply_delta(id, quantity)?
        } else {
            self.append(id, quantity)?
        };

        self.commit(id, kind, new_quantity)
    }

    /// Strict form of [`CartStore::update_quantity`].
    ///
    /// # Errors
    ///
    /// - [`CartError::NotInCart`]: the product has no line; nothing changed.
    /// - [`CartError::Persistence`]: the change was applied but not saved.
    pub fn try_update_quantity(
        &mut self,
        id: ProductId,
        delta: i64,
    ) -> Result<CartChange, CartError> {
        let (kind, new_quantity) = self.apply_delta(id, delta)?;

        self.commit(id, kind, new_quantity)
    }

    /// Strict form of [`CartStore::remove_item`].
    ///
    /// # Errors
    ///
    /// - [`CartError::NotInCart`]: the product has no line; nothing changed.
    /// - [`CartError::Persistence`]: the line was removed but the cart was not saved.
    pub fn try_remove_item(&mut self, id: ProductId) -> Result<CartChange, CartError> {
        let position = self.position(id).ok_or(CartError::NotInCart(id))?;

        self.lines.remove(position);

        self.commit(id, ChangeKind::Removed, 0)
    }

    /// Sum of `price * quantity` over all lines, in minor units.
    pub fn subtotal(&self) -> u64 {
        total_price(
            self.lines
                .iter()
                .map(|line| (line.product().price, line.quantity())),
        )
    }

    /// The subtotal as money in the catalog currency.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the subtotal does not fit a money value.
    pub fn subtotal_money(&self) -> Result<Money<'static, Currency>, PricingError> {
        to_money(self.subtotal(), self.catalog.currency())
    }

    /// Total units across all lines (not the number of distinct lines).
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(u64::from(line.quantity())))
    }

    /// Lines in the order products were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if any.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The catalog this store resolves products against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The persistence adapter.
    pub fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id() == id)
    }

    fn append(&mut self, id: ProductId, quantity: i64) -> Result<(ChangeKind, u32), CartError> {
        let product = self.catalog.get(id).ok_or(CartError::UnknownProduct(id))?;

        let invalid = CartError::InvalidQuantity {
            product: id,
            quantity,
        };

        if quantity <= 0 {
            return Err(invalid);
        }

        let line = CartLine::snapshot(product, u32::try_from(quantity).unwrap_or(u32::MAX))
            .ok_or(invalid)?;

        let added = line.quantity();
        self.lines.push(line);

        Ok((ChangeKind::Added, added))
    }

    fn apply_delta(&mut self, id: ProductId, delta: i64) -> Result<(ChangeKind, u32), CartError> {
        let position = self.position(id).ok_or(CartError::NotInCart(id))?;
        let line = self
            .lines
            .get_mut(position)
            .ok_or(CartError::NotInCart(id))?;

        let updated = i64::from(line.quantity()).saturating_add(delta);

        if updated > 0 {
            let quantity = u32::try_from(updated).unwrap_or(u32::MAX);
            line.set_quantity(quantity);

            return Ok((ChangeKind::QuantityChanged, quantity));
        }

        self.lines.remove(position);

        Ok((ChangeKind::Removed, 0))
    }

    /// Persist, then notify. Observers hear about the change even if the flush failed.
    fn commit(
        &mut self,
        product: ProductId,
        kind: ChangeKind,
        quantity: u32,
    ) -> Result<CartChange, CartError> {
        let saved = self.persistence.save(&self.lines);

        let change = CartChange {
            product,
            kind,
            quantity,
            item_count: self.item_count(),
            subtotal: self.subtotal(),
        };

        for observer in self.observers.values_mut() {
            observer.cart_changed(&change);
        }

        match saved {
            Ok(()) => Ok(change),
            Err(source) => Err(CartError::Persistence { change, source }),
        }
    }
}

fn log_outcome(operation: &'static str, outcome: Result<CartChange, CartError>) {
    match outcome {
        Ok(change) => debug!(
            operation,
            product = %change.product,
            kind = ?change.kind,
            quantity = change.quantity,
            item_count = change.item_count,
            "cart updated"
        ),
        Err(CartError::Persistence { change, source }) => warn!(
            operation,
            product = %change.product,
            error = %source,
            "cart updated but not saved"
        ),
        Err(error) => debug!(operation, %error, "cart operation ignored"),
    }
}

impl<S: KeyValueStore + fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("persistence", &self.persistence)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
