//! Pricing
//!
//! Line and cart totals in minor units, conversion to [`Money`], and display
//! formatting for the currencies the storefront prices in.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while converting totals to money values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The amount is larger than a money value can hold.
    #[error("Amount {0} is too large to represent as money")]
    Overflow(u64),
}

/// Price of `quantity` units, saturating at `u64::MAX`.
pub fn line_total(unit_price: u64, quantity: u32) -> u64 {
    unit_price.saturating_mul(u64::from(quantity))
}

/// Sum of `unit_price * quantity` over all lines, saturating at `u64::MAX`.
pub fn total_price(lines: impl IntoIterator<Item = (u64, u32)>) -> u64 {
    lines
        .into_iter()
        .fold(0, |acc, (price, quantity)| {
            acc.saturating_add(line_total(price, quantity))
        })
}

/// Convert a minor-unit amount into a money value.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the amount exceeds `i64::MAX`.
pub fn to_money(
    amount: u64,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor_units = i64::try_from(amount).map_err(|_err| PricingError::Overflow(amount))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPlacement {
    /// `£1.00`
    Prefix,

    /// `Rp 1.000`
    SpacedPrefix,
}

/// Display rules for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceFormat {
    symbol: &'static str,
    placement: SymbolPlacement,
    group_separator: char,
    decimal_separator: char,
    minor_digits: usize,
    show_fraction: bool,
}

impl PriceFormat {
    /// Display rules for a supported currency, `None` for anything else.
    ///
    /// Rupiah follows `id-ID` conventions and hides the sen fraction.
    pub fn for_currency(currency: &Currency) -> Option<Self> {
        let format = match currency.iso_alpha_code {
            "IDR" => Self {
                symbol: "Rp",
                placement: SymbolPlacement::SpacedPrefix,
                group_separator: '.',
                decimal_separator: ',',
                minor_digits: 2,
                show_fraction: false,
            },
            "GBP" => Self::two_decimal("£"),
            "USD" => Self::two_decimal("$"),
            "EUR" => Self::two_decimal("€"),
            _ => return None,
        };

        Some(format)
    }

    fn two_decimal(symbol: &'static str) -> Self {
        Self {
            symbol,
            placement: SymbolPlacement::Prefix,
            group_separator: ',',
            decimal_separator: '.',
            minor_digits: 2,
            show_fraction: true,
        }
    }

    /// Format a minor-unit amount.
    pub fn format(&self, amount: u64) -> String {
        let divisor = (0..self.minor_digits).fold(1_u64, |acc, _| acc.saturating_mul(10));

        let number = if self.show_fraction {
            let major = group_digits(amount / divisor, self.group_separator);
            let fraction = amount % divisor;

            format!(
                "{major}{}{fraction:0>width$}",
                self.decimal_separator,
                width = self.minor_digits
            )
        } else {
            let rounded = amount / divisor + u64::from(amount % divisor >= divisor.div_ceil(2));

            group_digits(rounded, self.group_separator)
        };

        match self.placement {
            SymbolPlacement::Prefix => format!("{}{number}", self.symbol),
            SymbolPlacement::SpacedPrefix => format!("{} {number}", self.symbol),
        }
    }
}

/// Format a minor-unit amount in the given currency.
///
/// Unsupported currencies fall back to the money value's own display, or to
/// `"<amount> <CODE>"` when the amount cannot be represented.
pub fn format_price(amount: u64, currency: &'static Currency) -> String {
    match PriceFormat::for_currency(currency) {
        Some(format) => format.format(amount),
        None => to_money(amount, currency).map_or_else(
            |_err| format!("{amount} {}", currency.iso_alpha_code),
            |money| money.to_string(),
        ),
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (len - position) % 3 == 0 {
            grouped.push(separator);
        }

        grouped.push(digit);
    }

    grouped
}
