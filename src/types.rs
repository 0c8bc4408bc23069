//! Primitive value types shared across the order book and feed decoder.
//!
//! Kept as plain integer aliases rather than newtypes: the hot path (matching,
//! level bookkeeping) does a lot of arithmetic on these values and the crate
//! favours cheap `Copy` primitives over wrapper-type ceremony, the way the
//! teacher crate's own `pricelevel` layer keeps `Price`/`Quantity` as thin
//! integer wrappers rather than rich domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique (within a trading day) resting-order identifier.
pub type OrderId = u64;

/// Fixed-point price, denominated in 1/10,000ths of the quote currency.
pub type Price = u64;

/// Resting order quantity, in shares.
pub type Shares = u32;

/// Nanoseconds since midnight, as decoded from a 48-bit big-endian field.
pub type Timestamp = u64;

/// Sentinel returned by the bid side when it holds no resting orders.
///
/// Chosen so `ask_price <= best_bid` is false against an empty bid book.
pub const BID_SENTINEL: Price = 0;

/// Sentinel returned by the ask side when it holds no resting orders.
///
/// Chosen so `bid_price >= best_ask` is false against an empty ask book.
pub const ASK_SENTINEL: Price = u64::MAX;

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Resting buy order (bid side).
    Buy,
    /// Resting sell order (ask side).
    Sell,
}

impl Side {
    /// The side an aggressing order on the other side of the book would be.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Decode the single-byte wire representation (`'B'` / `'S'`).
    pub fn from_wire_byte(b: u8) -> Option<Side> {
        match b {
            b'B' => Some(Side::Buy),
            b'S' => Some(Side::Sell),
            _ => None,
        }
    }

    /// Encode to the single-byte wire representation used by the CSV cache.
    pub fn to_wire_byte(self) -> u8 {
        match self {
            Side::Buy => b'B',
            Side::Sell => b'S',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

/// Convert a fixed-point [`Price`] into the quote currency for display/query
/// purposes (`price_in_currency = price / 10000`, per spec §6).
pub fn price_to_currency(price: Price) -> f64 {
    price as f64 / 10_000.0
}
