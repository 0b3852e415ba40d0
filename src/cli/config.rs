//! Storefront configuration

use std::path::PathBuf;

use clap::Args;
use eshop::{
    catalog::Catalog,
    fixtures::{DEMO_SET, Fixture, FixtureError, demo_catalog},
    persistence::{CartPersistence, DEFAULT_CART_KEY, FileStore, StorageError},
};

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub(crate) log_format: LogFormat,
}

/// Where the catalog comes from and where the cart is kept.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Directory the cart is stored in
    #[arg(long, env = "ESHOP_DATA_DIR", default_value = ".eshop", global = true)]
    pub(crate) data_dir: PathBuf,

    /// Storage key holding the cart
    #[arg(long, env = "ESHOP_CART_KEY", default_value = DEFAULT_CART_KEY, global = true)]
    pub(crate) cart_key: String,

    /// Fixture directory containing `products/<catalog>.yml`
    #[arg(long, env = "ESHOP_FIXTURES_DIR", global = true)]
    pub(crate) fixtures_dir: Option<PathBuf>,

    /// Fixture set to load the catalog from
    #[arg(long, env = "ESHOP_CATALOG", default_value = DEMO_SET, global = true)]
    pub(crate) catalog: String,
}

impl StoreConfig {
    /// Load the configured catalog. Without a fixture directory the `demo` set
    /// comes from the bundled copy.
    pub(crate) fn load_catalog(&self) -> Result<Catalog, FixtureError> {
        match &self.fixtures_dir {
            Some(dir) => Fixture::with_base_path(dir).load_catalog(&self.catalog),
            None if self.catalog == DEMO_SET => demo_catalog(),
            None => Fixture::new().load_catalog(&self.catalog),
        }
    }

    /// Open cart persistence in the data directory.
    pub(crate) fn open_persistence(&self) -> Result<CartPersistence<FileStore>, StorageError> {
        let store = FileStore::open(&self.data_dir)?;

        Ok(CartPersistence::with_key(store, self.cart_key.clone()))
    }
}
