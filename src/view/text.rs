//! Terminal rendering
//!
//! Writes view models as tables to any [`io::Write`].

use std::{io, ops::Range};

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::view::{
    Badge, CartView, DetailView, EMPTY_CART_MESSAGE, ListingView, NO_MATCHES_MESSAGE,
    NOT_FOUND_MESSAGE, PageView, ProductCard,
};

/// Listed under every product detail.
const DETAIL_PERKS: [&str; 3] = [
    "Free Shipping on orders over Rp 5.000.000",
    "30 Days Return Policy",
    "Secure Payment",
];

/// Errors that can occur while writing views.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output could not be written.
    #[error("Failed to write view output: {0}")]
    Io(#[from] io::Error),
}

/// Write any page view.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_page(out: &mut impl io::Write, view: &PageView) -> Result<(), RenderError> {
    match view {
        PageView::Home(cards) => write_cards(out, cards),
        PageView::Products(listing) => write_listing(out, listing),
        PageView::Detail(detail) => write_detail(out, detail),
        PageView::Cart(cart) => write_cart(out, cart),
    }
}

/// Write a grid of product cards.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_cards(out: &mut impl io::Write, cards: &[ProductCard]) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Price"]);

    for card in cards {
        builder.push_record([card.id.to_string(), card.name.clone(), card.price.clone()]);
    }

    write_table(out, builder, 2..3)
}

/// Write the product listing, or the no-match message.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_listing(out: &mut impl io::Write, listing: &ListingView) -> Result<(), RenderError> {
    match listing {
        ListingView::Products(cards) => write_cards(out, cards),
        ListingView::NoMatches => {
            writeln!(out, "{NO_MATCHES_MESSAGE}")?;

            Ok(())
        }
    }
}

/// Write a product detail, or the not-found message.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_detail(out: &mut impl io::Write, detail: &DetailView) -> Result<(), RenderError> {
    let DetailView::Found(detail) = detail else {
        writeln!(out, "{NOT_FOUND_MESSAGE}")?;

        return Ok(());
    };

    writeln!(out, "{}", detail.title)?;

    let quantity = detail.stepper.value().to_string();
    let mut builder = Builder::default();

    builder.push_record(["Category", detail.category.as_str()]);
    builder.push_record(["Price", detail.price.as_str()]);
    builder.push_record(["Quantity", quantity.as_str()]);
    builder.push_record(["Image", detail.image.as_str()]);

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();

    table.with(theme);
    table.modify(Columns::first(), Color::BOLD);

    writeln!(out, "{table}")?;
    writeln!(out, "{}\n", detail.description)?;

    for perk in DETAIL_PERKS {
        writeln!(out, "  ✓ {perk}")?;
    }

    Ok(())
}

/// Write the cart lines and order summary, or the empty-cart message.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_cart(out: &mut impl io::Write, cart: &CartView) -> Result<(), RenderError> {
    let CartView::Summary(summary) = cart else {
        writeln!(out, "{EMPTY_CART_MESSAGE}")?;

        return Ok(());
    };

    let mut builder = Builder::default();

    builder.push_record(["ID", "Item", "Unit Price", "Qty", "Line Total"]);

    for line in &summary.lines {
        builder.push_record([
            line.id.to_string(),
            line.name.clone(),
            line.unit_price.clone(),
            line.quantity.to_string(),
            line.line_total.clone(),
        ]);
    }

    write_table(out, builder, 2..5)?;

    let shipping = summary.shipping.to_string();
    let rows = [
        ("Subtotal:", summary.subtotal.as_str()),
        ("Shipping:", shipping.as_str()),
        ("Total:", summary.total.as_str()),
    ];

    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or_default();

    for (label, value) in rows {
        writeln!(out, " {label:>9}  {value:>value_width$}")?;
    }

    writeln!(out)?;

    Ok(())
}

/// Write the cart badge. A hidden badge prints the label alone.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_badge(out: &mut impl io::Write, badge: Badge) -> Result<(), RenderError> {
    if badge.hidden {
        writeln!(out, "Cart")?;
    } else {
        writeln!(out, "Cart ({})", badge.count)?;
    }

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: Range<usize>,
) -> Result<(), RenderError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(right_aligned), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}
