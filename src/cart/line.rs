//! Cart lines

use serde::{Deserialize, Serialize};

use crate::{
    pricing::line_total,
    products::{Product, ProductId},
};

/// A product snapshot and the quantity held in the cart.
///
/// Product fields are copied when the line is created; later catalog changes
/// do not reach existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    product: Product,

    quantity: u32,
}

impl CartLine {
    /// Snapshot `product` with the given quantity. Returns `None` for a zero quantity.
    pub fn snapshot(product: &Product, quantity: u32) -> Option<Self> {
        (quantity > 0).then(|| Self {
            product: product.clone(),
            quantity,
        })
    }

    /// The product snapshot.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Id of the product on this line.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Number of units, always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    pub fn total(&self) -> u64 {
        line_total(self.product.price, self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity > 0, "cart lines never hold a zero quantity");

        self.quantity = quantity;
    }
}
