//! View Binder
//!
//! Turns catalog and cart state into per-page view models. Which pages are
//! shown is decided by the containers the rendering [`Surface`] provides, so
//! one binder serves every page of the storefront.

use smallvec::SmallVec;

use crate::{
    cart::CartStore,
    catalog::{Catalog, ProductFilter},
    persistence::KeyValueStore,
};

mod badge;
mod cards;
mod cart;
mod detail;
pub mod text;

pub use badge::{Badge, BadgeObserver};
pub use cards::{ListingView, NO_MATCHES_MESSAGE, ProductCard};
pub use cart::{CartLineView, CartSummary, CartView, EMPTY_CART_MESSAGE, Shipping};
pub use detail::{
    DetailView, NOT_FOUND_MESSAGE, ProductDetail, QuantityStepper, parse_product_id, query_param,
};

/// Storefront pages, each owning one container on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Featured products
    Home,

    /// Full listing with filter and search
    Products,

    /// Single product
    ProductDetail,

    /// Cart contents and order summary
    Cart,
}

impl Page {
    /// Every page, in detection order.
    pub const ALL: [Self; 4] = [Self::Home, Self::Products, Self::ProductDetail, Self::Cart];

    /// Id of the container this page renders into.
    pub const fn container_id(self) -> &'static str {
        match self {
            Self::Home => "featured-products",
            Self::Products => "all-products",
            Self::ProductDetail => "product-detail-container",
            Self::Cart => "cart-container",
        }
    }

    /// Pages whose container is present on the surface.
    pub fn detect(surface: &impl Surface) -> SmallVec<[Self; 4]> {
        Self::ALL
            .into_iter()
            .filter(|page| surface.has_container(page.container_id()))
            .collect()
    }
}

/// Whatever the views are rendered onto.
pub trait Surface {
    /// Check if the surface has a container with this id.
    fn has_container(&self, id: &str) -> bool;

    /// Raw query string of the current location, with or without a leading `?`.
    fn query(&self) -> &str;
}

/// A surface described by its container ids and query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSurface {
    containers: SmallVec<[&'static str; 4]>,
    query: String,
}

impl PageSurface {
    /// A surface with no containers and an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface holding the container for `page`.
    pub fn for_page(page: Page) -> Self {
        Self::new().with_container(page.container_id())
    }

    /// Add a container.
    #[must_use]
    pub fn with_container(mut self, id: &'static str) -> Self {
        self.containers.push(id);
        self
    }

    /// Set the query string.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

impl Surface for PageSurface {
    fn has_container(&self, id: &str) -> bool {
        self.containers.iter().any(|container| *container == id)
    }

    fn query(&self) -> &str {
        &self.query
    }
}

/// View model for one detected page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    /// Featured product cards
    Home(Vec<ProductCard>),

    /// Product listing
    Products(ListingView),

    /// Product detail
    Detail(DetailView),

    /// Cart
    Cart(CartView),
}

/// Builds view models from a cart and the catalog it resolves against.
/// Holds no state of its own.
#[derive(Debug)]
pub struct ViewBinder<'a, S: KeyValueStore> {
    cart: &'a CartStore<S>,
}

impl<'a, S: KeyValueStore> ViewBinder<'a, S> {
    /// Bind views to a cart. Product lookups and prices use the cart's catalog.
    pub fn new(cart: &'a CartStore<S>) -> Self {
        Self { cart }
    }

    fn catalog(&self) -> &'a Catalog {
        self.cart.catalog()
    }

    /// Featured products for the home page.
    pub fn home(&self) -> Vec<ProductCard> {
        let catalog = self.catalog();

        cards::cards(catalog.featured(), catalog.currency())
    }

    /// Products matching `filter`, in catalog order.
    pub fn listing(&self, filter: &ProductFilter) -> ListingView {
        let catalog = self.catalog();

        ListingView::from_cards(cards::cards(catalog.filter(filter), catalog.currency()))
    }

    /// Detail view for the product named by the `id` parameter of `query`.
    pub fn detail(&self, query: &str) -> DetailView {
        detail::detail_view(self.catalog(), query)
    }

    /// Cart contents and order summary.
    pub fn cart(&self) -> CartView {
        cart::cart_view(self.cart)
    }

    /// Cart count badge.
    pub fn badge(&self) -> Badge {
        Badge::for_count(self.cart.item_count())
    }

    /// Views for every page present on the surface.
    pub fn render(&self, surface: &impl Surface) -> Vec<PageView> {
        Page::detect(surface)
            .into_iter()
            .map(|page| match page {
                Page::Home => PageView::Home(self.home()),
                Page::Products => PageView::Products(self.listing(&ProductFilter::new())),
                Page::ProductDetail => PageView::Detail(self.detail(surface.query())),
                Page::Cart => PageView::Cart(self.cart()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{fixtures::demo_catalog, products::ProductId};

    use super::*;

    #[test]
    fn detect_finds_nothing_on_empty_surface() {
        assert!(Page::detect(&PageSurface::new()).is_empty());
    }

    #[test]
    fn detect_reports_pages_in_fixed_order() {
        let surface = PageSurface::new()
            .with_container("cart-container")
            .with_container("unrelated")
            .with_container("featured-products");

        assert_eq!(
            Page::detect(&surface).as_slice(),
            &[Page::Home, Page::Cart]
        );
    }

    #[test]
    fn container_ids_round_trip_through_detection() {
        for page in Page::ALL {
            let detected = Page::detect(&PageSurface::for_page(page));

            assert_eq!(detected.as_slice(), &[page], "page {page:?}");
        }
    }

    #[test]
    fn render_builds_view_per_detected_page() -> TestResult {
        let mut store = CartStore::in_memory(Arc::new(demo_catalog()?));
        store.add_item(ProductId::new(3), 1);

        let binder = ViewBinder::new(&store);
        let surface = PageSurface::for_page(Page::ProductDetail)
            .with_container(Page::Cart.container_id())
            .with_query("?id=3");

        let views = binder.render(&surface);

        assert_eq!(views.len(), 2);
        assert!(
            matches!(views.first(), Some(PageView::Detail(DetailView::Found(detail))) if detail.id == ProductId::new(3)),
            "expected headphones detail, got {views:?}"
        );
        assert!(
            matches!(views.get(1), Some(PageView::Cart(CartView::Summary(_)))),
            "expected cart summary, got {views:?}"
        );

        Ok(())
    }

    #[test]
    fn render_products_page_lists_whole_catalog() -> TestResult {
        let store = CartStore::in_memory(Arc::new(demo_catalog()?));
        let binder = ViewBinder::new(&store);

        let views = binder.render(&PageSurface::for_page(Page::Products));

        assert!(
            matches!(views.as_slice(), [PageView::Products(ListingView::Products(cards))] if cards.len() == store.catalog().len()),
            "expected full listing, got {views:?}"
        );

        Ok(())
    }

    #[test]
    fn badge_tracks_item_count() -> TestResult {
        let mut store = CartStore::in_memory(Arc::new(demo_catalog()?));

        assert_eq!(ViewBinder::new(&store).badge(), Badge::for_count(0));

        store.add_item(ProductId::new(1), 2);
        store.add_item(ProductId::new(2), 1);

        let badge = ViewBinder::new(&store).badge();

        assert_eq!(badge.count, 3);
        assert!(!badge.hidden);

        Ok(())
    }
}
