//! Cart page

use std::fmt;

use crate::{
    cart::CartStore,
    persistence::KeyValueStore,
    pricing::format_price,
    products::ProductId,
};

/// Shown instead of the cart table when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Shipping charge applied to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shipping {
    /// No charge
    Free,
}

impl Shipping {
    /// Charge in minor units.
    pub const fn cost(self) -> u64 {
        match self {
            Self::Free => 0,
        }
    }
}

impl fmt::Display for Shipping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("Free"),
        }
    }
}

/// One cart line as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Product id, target of the quantity and remove actions
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Image reference
    pub image: String,

    /// Formatted unit price
    pub unit_price: String,

    /// Formatted `unit price * quantity`
    pub line_total: String,

    /// Units of this product
    pub quantity: u32,
}

/// Cart lines and order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Lines in cart order
    pub lines: Vec<CartLineView>,

    /// Total units
    pub item_count: u64,

    /// Formatted subtotal
    pub subtotal: String,

    /// Shipping charge
    pub shipping: Shipping,

    /// Formatted subtotal plus shipping
    pub total: String,
}

/// The cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartView {
    /// No lines, the summary is hidden.
    Empty,

    /// At least one line.
    Summary(CartSummary),
}

pub(crate) fn cart_view<S: KeyValueStore>(cart: &CartStore<S>) -> CartView {
    if cart.is_empty() {
        return CartView::Empty;
    }

    let currency = cart.catalog().currency();

    let lines = cart
        .lines()
        .iter()
        .map(|line| CartLineView {
            id: line.id(),
            name: line.product().name.clone(),
            image: line.product().image.clone(),
            unit_price: format_price(line.product().price, currency),
            line_total: format_price(line.total(), currency),
            quantity: line.quantity(),
        })
        .collect();

    let shipping = Shipping::Free;
    let subtotal = cart.subtotal();

    CartView::Summary(CartSummary {
        lines,
        item_count: cart.item_count(),
        subtotal: format_price(subtotal, currency),
        shipping,
        total: format_price(subtotal.saturating_add(shipping.cost()), currency),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use rusty_money::iso::USD;

    use crate::{
        catalog::Catalog,
        fixtures::demo_catalog,
        products::Product,
        view::ViewBinder,
    };

    use super::*;

    #[test]
    fn empty_cart_has_no_summary() -> TestResult {
        let store = CartStore::in_memory(Arc::new(demo_catalog()?));

        assert_eq!(cart_view(&store), CartView::Empty);

        Ok(())
    }

    #[test]
    fn summary_formats_lines_and_totals() -> TestResult {
        let mut store = CartStore::in_memory(Arc::new(demo_catalog()?));

        store.add_item(ProductId::new(3), 1);
        store.add_item(ProductId::new(6), 2);

        let CartView::Summary(summary) = cart_view(&store) else {
            return Err("expected a cart summary".into());
        };

        let wallet = summary.lines.get(1).ok_or("expected wallet line")?;

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(wallet.unit_price, "Rp 350.000");
        assert_eq!(wallet.line_total, "Rp 700.000");
        assert_eq!(wallet.quantity, 2);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, "Rp 3.000.000");
        assert_eq!(summary.shipping.to_string(), "Free");
        assert_eq!(summary.total, summary.subtotal);

        Ok(())
    }

    #[test]
    fn summary_uses_the_cart_catalog_currency() -> TestResult {
        let mug = Product {
            id: ProductId::new(1),
            name: "Mug".to_string(),
            category: "home".to_string(),
            description: "Stoneware mug".to_string(),
            price: 1250,
            image: "mug.png".to_string(),
        };
        let mut store = CartStore::in_memory(Arc::new(Catalog::new([mug], USD)?));

        store.add_item(ProductId::new(1), 2);

        let CartView::Summary(summary) = ViewBinder::new(&store).cart() else {
            return Err("expected a cart summary".into());
        };

        assert_eq!(summary.subtotal, "$25.00");
        assert_eq!(
            summary.lines.first().map(|line| line.unit_price.as_str()),
            Some("$12.50")
        );

        Ok(())
    }
}
