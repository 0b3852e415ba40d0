//! Cart Observer

use slotmap::new_key_type;

use crate::products::ProductId;

new_key_type! {
    /// Handle returned when subscribing an observer to a cart store.
    pub struct ObserverKey;
}

/// What a mutation did to the affected line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A new line was appended.
    Added,

    /// An existing line's quantity changed.
    QuantityChanged,

    /// The line was removed.
    Removed,
}

/// Notification sent to observers after a cart mutation.
///
/// Aggregates describe the cart after the mutation was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChange {
    /// Product whose line changed
    pub product: ProductId,

    /// Kind of change
    pub kind: ChangeKind,

    /// New quantity of the line, `0` once removed
    pub quantity: u32,

    /// Total units in the cart
    pub item_count: u64,

    /// Cart subtotal in minor units
    pub subtotal: u64,
}

/// Receives a callback after every cart mutation.
///
/// Any `FnMut(&CartChange)` closure is an observer.
pub trait CartObserver {
    /// Called once per mutation, after the cart has been persisted.
    fn cart_changed(&mut self, change: &CartChange);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartChange),
{
    fn cart_changed(&mut self, change: &CartChange) {
        self(change);
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn cart_changed(&mut self, _change: &CartChange) {}
}
