//! Product cards for the home and listing pages

use rusty_money::iso::Currency;

use crate::{
    pricing::format_price,
    products::{Product, ProductId},
};

/// Shown in place of the listing when no product matches.
pub const NO_MATCHES_MESSAGE: &str = "No products found matching your criteria.";

/// A product as shown in a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Product id, used for the detail link and the add-to-cart action
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Formatted unit price
    pub price: String,

    /// Image reference
    pub image: String,
}

impl ProductCard {
    /// Card for a product priced in `currency`.
    pub fn new(product: &Product, currency: &'static Currency) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: format_price(product.price, currency),
            image: product.image.clone(),
        }
    }

    /// Link to the product's detail page.
    pub fn detail_href(&self) -> String {
        format!("product-detail.html?id={}", self.id)
    }
}

/// The product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingView {
    /// At least one product matched.
    Products(Vec<ProductCard>),

    /// Nothing matched.
    NoMatches,
}

impl ListingView {
    pub(crate) fn from_cards(cards: Vec<ProductCard>) -> Self {
        if cards.is_empty() {
            Self::NoMatches
        } else {
            Self::Products(cards)
        }
    }

    /// Matching cards, empty when nothing matched.
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            Self::Products(cards) => cards,
            Self::NoMatches => &[],
        }
    }
}

pub(crate) fn cards<'a>(
    products: impl Iterator<Item = &'a Product>,
    currency: &'static Currency,
) -> Vec<ProductCard> {
    products
        .map(|product| ProductCard::new(product, currency))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        cart::CartStore, catalog::ProductFilter, fixtures::demo_catalog, view::ViewBinder,
    };

    use super::*;

    fn names(cards: &[ProductCard]) -> Vec<&str> {
        cards.iter().map(|card| card.name.as_str()).collect()
    }

    #[test]
    fn home_shows_first_four_products() -> TestResult {
        let store = CartStore::in_memory(Arc::new(demo_catalog()?));

        let home = ViewBinder::new(&store).home();

        assert_eq!(
            names(&home),
            [
                "Minimalist Watch",
                "Premium Backpack",
                "Wireless Headphones",
                "Bee Hoodie"
            ]
        );
        assert_eq!(home.first().map(|card| card.price.as_str()), Some("Rp 1.500.000"));

        Ok(())
    }

    #[test]
    fn listing_applies_category_then_search() -> TestResult {
        let store = CartStore::in_memory(Arc::new(demo_catalog()?));
        let binder = ViewBinder::new(&store);

        let filter = ProductFilter::from_inputs(Some("accessories"), Some("LEATHER"));
        let listing = binder.listing(&filter);

        assert_eq!(names(listing.cards()), ["Leather Wallet"]);

        Ok(())
    }

    #[test]
    fn listing_reports_no_matches() -> TestResult {
        let store = CartStore::in_memory(Arc::new(demo_catalog()?));
        let binder = ViewBinder::new(&store);

        let listing = binder.listing(&ProductFilter::new().with_category("electronics").with_query("lamp"));

        assert_eq!(listing, ListingView::NoMatches);
        assert!(listing.cards().is_empty());

        Ok(())
    }

    #[test]
    fn card_links_to_detail_page() -> TestResult {
        let catalog = demo_catalog()?;
        let product = catalog.get(ProductId::new(7)).ok_or("missing ear buds")?;

        let card = ProductCard::new(product, catalog.currency());

        assert_eq!(card.detail_href(), "product-detail.html?id=7");
        assert_eq!(card.price, "Rp 1.800.000");

        Ok(())
    }
}
