//! Command line interface

use std::{io, sync::Arc};

use clap::{Parser, Subcommand};
use eshop::{
    cart::{CartChange, CartError, CartStore, ChangeKind},
    catalog::ProductFilter,
    fixtures::FixtureError,
    persistence::{FileStore, StorageError},
    products::ProductId,
    view::{
        BadgeObserver, Page, PageSurface, ViewBinder,
        text::{self, RenderError},
    },
};
use thiserror::Error;
use tracing::debug;
use url::form_urlencoded;

use crate::cli::config::{LoggingConfig, StoreConfig};

pub(crate) mod config;
pub(crate) mod logging;

/// Errors that end a command unsuccessfully.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// The data directory could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A cart command was rejected or not saved.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Output could not be written.
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Parser)]
#[command(name = "eshop", about = "E-Shop terminal storefront", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) store: StoreConfig,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show featured products
    Home,

    /// List products, optionally filtered
    Products {
        /// Only show this category ("all" shows every category)
        #[arg(long)]
        category: Option<String>,

        /// Only show products whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one product
    Show {
        /// Product id; trailing non-digits are ignored
        id: String,
    },

    /// Add a product to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Change a cart line's quantity by a signed amount
    Update {
        /// Product id
        id: ProductId,

        /// Units to add (positive) or take away (negative)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Show the cart and order summary
    Cart,

    /// Show the number of items in the cart
    Count,
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Run the command, writing rendered output to `out`.
    pub(crate) fn run(self, out: &mut impl io::Write) -> Result<(), CliError> {
        let catalog = Arc::new(self.store.load_catalog()?);
        let mut store = CartStore::open(catalog, self.store.open_persistence()?);

        debug!(command = ?self.command, "running command");

        match self.command {
            Command::Home => render_page(out, &store, &PageSurface::for_page(Page::Home)),
            Command::Products { category, search } => {
                let filter = ProductFilter::from_inputs(category.as_deref(), search.as_deref());
                let listing = ViewBinder::new(&store).listing(&filter);

                Ok(text::write_listing(out, &listing)?)
            }
            Command::Show { id } => render_page(
                out,
                &store,
                &PageSurface::for_page(Page::ProductDetail).with_query(
                    form_urlencoded::Serializer::new(String::from("?"))
                        .append_pair("id", &id)
                        .finish(),
                ),
            ),
            Command::Add { id, quantity } => {
                mutate(out, &mut store, |store| store.try_add_item(id, quantity))
            }
            Command::Update { id, delta } => mutate(out, &mut store, |store| {
                store.try_update_quantity(id, delta)
            }),
            Command::Remove { id } => {
                mutate(out, &mut store, |store| store.try_remove_item(id))
            }
            Command::Cart => render_page(out, &store, &PageSurface::for_page(Page::Cart)),
            Command::Count => Ok(text::write_badge(
                out,
                ViewBinder::new(&store).badge(),
            )?),
        }
    }
}

fn render_page(
    out: &mut impl io::Write,
    store: &CartStore<FileStore>,
    surface: &PageSurface,
) -> Result<(), CliError> {
    for view in ViewBinder::new(store).render(surface) {
        text::write_page(out, &view)?;
    }

    Ok(())
}

fn mutate(
    out: &mut impl io::Write,
    store: &mut CartStore<FileStore>,
    operation: impl FnOnce(&mut CartStore<FileStore>) -> Result<CartChange, CartError>,
) -> Result<(), CliError> {
    let badge = BadgeObserver::new(store.item_count());
    let key = store.subscribe(badge.clone());

    let outcome = operation(store);
    store.unsubscribe(key);

    let change = outcome?;
    let name = store
        .catalog()
        .get(change.product)
        .map_or_else(|| change.product.to_string(), |product| product.name.clone());

    match change.kind {
        ChangeKind::Added => writeln!(out, "Added {name} to cart").map_err(RenderError::from)?,
        ChangeKind::QuantityChanged => {
            writeln!(out, "{name}: quantity {}", change.quantity).map_err(RenderError::from)?;
        }
        ChangeKind::Removed => {
            writeln!(out, "Removed {name} from cart").map_err(RenderError::from)?;
        }
    }

    text::write_badge(out, badge.current())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use testresult::TestResult;

    use super::*;

    fn run(data_dir: &Path, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
        let dir = data_dir.to_str().ok_or("non-utf8 temp dir")?;
        let mut argv = vec!["eshop", "--data-dir", dir, "--catalog", "demo"];
        argv.extend_from_slice(args);

        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();

        cli.run(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn cart_survives_between_invocations() -> TestResult {
        let dir = tempfile::tempdir()?;

        let added = run(dir.path(), &["add", "3", "--quantity", "2"])?;
        assert!(added.contains("Added Wireless Headphones to cart"));
        assert!(added.contains("Cart (2)"));

        let cart = run(dir.path(), &["cart"])?;
        assert!(cart.contains("Wireless Headphones"));
        assert!(cart.contains("Rp 4.600.000"));

        assert_eq!(run(dir.path(), &["count"])?, "Cart (2)\n");

        Ok(())
    }

    #[test]
    fn update_to_zero_removes_line() -> TestResult {
        let dir = tempfile::tempdir()?;

        run(dir.path(), &["add", "6"])?;
        let updated = run(dir.path(), &["update", "6", "-1"])?;

        assert!(updated.contains("Removed Leather Wallet from cart"));
        assert!(run(dir.path(), &["cart"])?.contains("Your cart is empty."));

        Ok(())
    }

    #[test]
    fn unknown_product_is_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        let cli = Cli::try_parse_from([
            "eshop",
            "--data-dir",
            dir.path().to_str().ok_or("non-utf8 temp dir")?,
            "add",
            "99",
        ])?;

        let result = cli.run(&mut Vec::new());

        assert!(
            matches!(result, Err(CliError::Cart(CartError::UnknownProduct(_)))),
            "expected unknown product, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn show_accepts_loose_ids() -> TestResult {
        let dir = tempfile::tempdir()?;

        assert!(run(dir.path(), &["show", "8abc"])?.contains("Sunglasses - E-Shop"));
        assert!(run(dir.path(), &["show", "nope"])?.contains("Product not found."));

        Ok(())
    }

    #[test]
    fn products_filters_by_category_and_search() -> TestResult {
        let dir = tempfile::tempdir()?;

        let output = run(
            dir.path(),
            &["products", "--category", "electronics", "--search", "ear"],
        )?;

        assert!(output.contains("Ear Buds"));
        assert!(!output.contains("Wireless Headphones"));

        Ok(())
    }
}
