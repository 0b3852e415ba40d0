//! E-Shop prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartChange, CartError, CartLine, CartObserver, CartStore, ChangeKind, ObserverKey},
    catalog::{Catalog, CatalogError, ProductFilter},
    fixtures::{Fixture, FixtureError, demo_catalog},
    persistence::{
        CartPersistence, FileStore, KeyValueStore, MemoryStore, PersistenceError, StorageError,
    },
    pricing::{PriceFormat, format_price},
    products::{Product, ProductId},
    view::{
        Badge, BadgeObserver, CartView, DetailView, ListingView, Page, PageView, ProductCard,
        Surface, ViewBinder,
    },
};
