//! Product Fixtures

use rusty_money::iso::{Currency, EUR, GBP, IDR, USD};
use serde::Deserialize;

use crate::{catalog::Catalog, fixtures::FixtureError, products::Product};

/// Catalog fixture as written in YAML.
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// ISO currency code all prices are denominated in (e.g. "IDR")
    pub currency: String,

    /// Ordered product list
    pub products: Vec<Product>,
}

impl TryFrom<ProductsFixture> for Catalog {
    type Error = FixtureError;

    fn try_from(fixture: ProductsFixture) -> Result<Self, Self::Error> {
        let currency = parse_currency(&fixture.currency)?;

        Ok(Catalog::new(fixture.products, currency)?)
    }
}

/// Parse a YAML catalog fixture.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, the currency is unknown, or the
/// products do not form a valid catalog.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: ProductsFixture = serde_norway::from_str(yaml)?;

    fixture.try_into()
}

/// Resolve a supported ISO currency code.
///
/// # Errors
///
/// Returns `FixtureError::UnknownCurrency` for codes the storefront cannot price in.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "IDR" => Ok(IDR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
