//! Product listing filter
//!
//! Category filtering followed by a case-insensitive name search.

use crate::products::Product;

/// Category value meaning "do not filter by category".
pub const ALL_CATEGORIES: &str = "all";

/// Category and search filter for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    category: Option<String>,

    /// Stored lowercased.
    query: Option<String>,
}

impl ProductFilter {
    /// A filter that matches every product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw form inputs, where either input may be missing.
    #[must_use]
    pub fn from_inputs(category: Option<&str>, query: Option<&str>) -> Self {
        let mut filter = Self::new();

        if let Some(category) = category {
            filter = filter.with_category(category);
        }

        if let Some(query) = query {
            filter = filter.with_query(query);
        }

        filter
    }

    /// Restrict to one category. `"all"` and the empty string clear the restriction.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();

        self.category = if category.is_empty() || category == ALL_CATEGORIES {
            None
        } else {
            Some(category)
        };

        self
    }

    /// Restrict to names containing `query`, ignoring case. The empty string clears it.
    #[must_use]
    pub fn with_query(mut self, query: impl AsRef<str>) -> Self {
        let query = query.as_ref();

        self.query = if query.is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };

        self
    }

    /// Active category restriction, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Active (lowercased) search query, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Check whether a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }

        match &self.query {
            Some(query) => product.name.to_lowercase().contains(query.as_str()),
            None => true,
        }
    }
}
