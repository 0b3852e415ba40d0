//! Cart codec
//!
//! Carts are stored as a versioned JSON envelope:
//!
//! ```json
//! {"version":1,"lines":[{"id":3,"name":"…","category":"…","description":"…","price":230000000,"image":"…","quantity":2}]}
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::CartLine, products::ProductId};

/// Current envelope version.
pub const FORMAT_VERSION: u32 = 1;

/// Errors raised while encoding or decoding a stored cart.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a well-formed envelope.
    #[error("Malformed cart data: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope was written by an unknown format version.
    #[error("Unsupported cart format version {0}")]
    UnsupportedVersion(u32),

    /// A line holds a zero quantity.
    #[error("Cart line for product {0} has quantity 0")]
    ZeroQuantity(ProductId),

    /// Two lines share a product id.
    #[error("Cart contains product {0} more than once")]
    DuplicateLine(ProductId),
}

#[derive(Serialize)]
struct EncodedCart<'a> {
    version: u32,
    lines: &'a [CartLine],
}

#[derive(Deserialize)]
struct StoredCart {
    version: u32,
    lines: serde_json::Value,
}

/// Encode cart lines into the stored representation.
///
/// # Errors
///
/// Returns a `CodecError` if serialization fails.
pub fn encode(lines: &[CartLine]) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(&EncodedCart {
        version: FORMAT_VERSION,
        lines,
    })?)
}

/// Decode the stored representation back into cart lines.
///
/// # Errors
///
/// Returns a `CodecError` if the bytes are not a supported envelope or the
/// lines break the cart invariants.
pub fn decode(bytes: &[u8]) -> Result<Vec<CartLine>, CodecError> {
    let stored: StoredCart = serde_json::from_slice(bytes)?;

    if stored.version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(stored.version));
    }

    let lines: Vec<CartLine> = serde_json::from_value(stored.lines)?;
    let mut seen = FxHashSet::default();

    for line in &lines {
        if line.quantity() == 0 {
            return Err(CodecError::ZeroQuantity(line.id()));
        }

        if !seen.insert(line.id()) {
            return Err(CodecError::DuplicateLine(line.id()));
        }
    }

    Ok(lines)
}
