//! Catalog
//!
//! The read-only, ordered product sequence a storefront is built on. A catalog
//! is validated once when it is constructed and never mutated afterwards.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{Product, ProductId};

pub mod filter;

pub use filter::{ALL_CATEGORIES, ProductFilter};

/// Number of products shown on the home page.
pub const FEATURED_COUNT: usize = 4;

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("Product id {0} appears more than once")]
    DuplicateId(ProductId),

    /// A product id is zero (position in the sequence).
    #[error("Product at position {0} has id 0; ids must be positive")]
    ZeroId(usize),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create a catalog from an ordered product sequence.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if an id is zero or used more than once.
    pub fn new(
        products: impl Into<Vec<Product>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if product.id.get() == 0 {
                return Err(CatalogError::ZeroId(position));
            }

            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        Ok(Catalog {
            products,
            index,
            currency,
        })
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// Check whether the catalog contains a product id.
    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterate over the products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// The leading products shown on the home page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().take(FEATURED_COUNT)
    }

    /// Products matching the given filter, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a ProductFilter) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| filter.matches(product))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> SmallVec<[&str; 8]> {
        let mut categories: SmallVec<[&str; 8]> = SmallVec::new();

        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(product.category.as_str());
            }
        }

        categories
    }

    /// Get the number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency all product prices are denominated in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
