//! Cart count badge

use std::{cell::Cell, rc::Rc};

use crate::cart::{CartChange, CartObserver};

/// Total units in the cart, hidden when there are none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    /// Units in the cart
    pub count: u64,

    /// Whether the badge should be hidden
    pub hidden: bool,
}

impl Badge {
    /// The badge for a given item count.
    pub const fn for_count(count: u64) -> Self {
        Self {
            count,
            hidden: count == 0,
        }
    }
}

/// Keeps a shared [`Badge`] current as the cart changes.
///
/// Clones share the same badge, so one clone can be subscribed to the store
/// while another is read by the renderer.
#[derive(Debug, Clone)]
pub struct BadgeObserver {
    badge: Rc<Cell<Badge>>,
}

impl BadgeObserver {
    /// Start from the badge for `count` items.
    pub fn new(count: u64) -> Self {
        Self {
            badge: Rc::new(Cell::new(Badge::for_count(count))),
        }
    }

    /// The latest badge.
    pub fn current(&self) -> Badge {
        self.badge.get()
    }
}

impl Default for BadgeObserver {
    fn default() -> Self {
        Self::new(0)
    }
}

impl CartObserver for BadgeObserver {
    fn cart_changed(&mut self, change: &CartChange) {
        self.badge.set(Badge::for_count(change.item_count));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{cart::CartStore, fixtures::demo_catalog, products::ProductId};

    use super::*;

    #[test]
    fn empty_cart_hides_badge() {
        assert_eq!(
            Badge::for_count(0),
            Badge {
                count: 0,
                hidden: true
            }
        );
        assert!(!Badge::for_count(1).hidden);
    }

    #[test]
    fn observer_follows_cart_mutations() -> TestResult {
        let mut store = CartStore::in_memory(Arc::new(demo_catalog()?));
        let badge = BadgeObserver::default();

        store.subscribe(badge.clone());

        store.add_item(ProductId::new(5), 2);
        assert_eq!(badge.current(), Badge::for_count(2));

        store.update_quantity(ProductId::new(5), 3);
        assert_eq!(badge.current().count, 5);

        store.remove_item(ProductId::new(5));
        assert!(badge.current().hidden);

        Ok(())
    }

    #[test]
    fn ignored_operations_leave_badge_alone() -> TestResult {
        let mut store = CartStore::in_memory(Arc::new(demo_catalog()?));
        let badge = BadgeObserver::new(7);

        store.subscribe(badge.clone());
        store.add_item(ProductId::new(999), 1);
        store.update_quantity(ProductId::new(1), 1);

        assert_eq!(badge.current(), Badge::for_count(7));

        Ok(())
    }
}
