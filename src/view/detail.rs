//! Product detail page

use std::borrow::Cow;

use url::form_urlencoded;

use crate::{catalog::Catalog, pricing::format_price, products::ProductId};

/// Shown when the requested product does not exist.
pub const NOT_FOUND_MESSAGE: &str = "Product not found.";

/// Everything the detail page shows for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    /// Product id
    pub id: ProductId,

    /// Document title, `"{name} - E-Shop"`
    pub title: String,

    /// Product name
    pub name: String,

    /// Category label
    pub category: String,

    /// Formatted unit price
    pub price: String,

    /// Long description
    pub description: String,

    /// Image reference
    pub image: String,

    /// Quantity picker for the add-to-cart action
    pub stepper: QuantityStepper,
}

/// Result of resolving the detail page's product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// The product exists.
    Found(ProductDetail),

    /// The id was missing, malformed, or not in the catalog.
    NotFound,
}

/// Quantity picker that never goes below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    value: u32,
}

impl QuantityStepper {
    /// A stepper at 1.
    pub const fn new() -> Self {
        Self { value: 1 }
    }

    /// Current quantity.
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Move by `delta`, clamping at 1. Returns the new value.
    pub fn adjust(&mut self, delta: i64) -> u32 {
        let moved = i64::from(self.value).saturating_add(delta).max(1);

        self.value = u32::try_from(moved).unwrap_or(u32::MAX);
        self.value
    }
}

impl Default for QuantityStepper {
    fn default() -> Self {
        Self::new()
    }
}

/// First value of parameter `name` in a query string.
///
/// A leading `?` is ignored and a key without `=` has an empty value. Keys
/// and values are percent-decoded, with `+` read as a space.
pub fn query_param<'q>(query: &'q str, name: &str) -> Option<Cow<'q, str>> {
    let pairs = query.strip_prefix('?').unwrap_or(query);

    form_urlencoded::parse(pairs.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Parse a product id from the start of `raw`.
///
/// Leading whitespace and a `+` sign are skipped, then the longest run of
/// digits is read and anything after it is ignored (`"12abc"` is `12`). A
/// `0x` prefix switches to hexadecimal. Negative, empty and out-of-range
/// input yields `None`.
pub fn parse_product_id(raw: &str) -> Option<ProductId> {
    let trimmed = raw.trim_start();

    if trimmed.starts_with('-') {
        return None;
    }

    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let (leading, _) = digits.split_at(end);

    if leading.is_empty() {
        return None;
    }

    u32::from_str_radix(leading, radix).ok().map(ProductId::new)
}

pub(crate) fn detail_view(catalog: &Catalog, query: &str) -> DetailView {
    let product = query_param(query, "id")
        .and_then(|raw| parse_product_id(&raw))
        .and_then(|id| catalog.get(id));

    let Some(product) = product else {
        return DetailView::NotFound;
    };

    DetailView::Found(ProductDetail {
        id: product.id,
        title: format!("{} - E-Shop", product.name),
        name: product.name.clone(),
        category: product.category.clone(),
        price: format_price(product.price, catalog.currency()),
        description: product.description.clone(),
        image: product.image.clone(),
        stepper: QuantityStepper::new(),
    })
}
