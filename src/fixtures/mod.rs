//! Fixtures
//!
//! Catalogs are loaded from YAML fixture files laid out as
//! `<base>/products/<name>.yml`. The `demo` set is also compiled into the crate.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

pub mod products;

/// Name of the bundled fixture set.
pub const DEMO_SET: &str = "demo";

const DEMO_PRODUCTS_YAML: &str = include_str!("../../fixtures/products/demo.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The products do not form a valid catalog
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Fixture loader rooted at a base directory.
#[derive(Debug, Clone)]
pub struct Fixture {
    base_path: PathBuf,
}

impl Fixture {
    /// Create a loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Base directory fixture files are resolved against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load a catalog from `products/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, names an unknown
    /// currency, or contains invalid product ids.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        products::parse_catalog(&contents)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The catalog bundled with the crate.
///
/// # Errors
///
/// Returns an error if the bundled fixture fails to parse.
pub fn demo_catalog() -> Result<Catalog, FixtureError> {
    products::parse_catalog(DEMO_PRODUCTS_YAML)
}
