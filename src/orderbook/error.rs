//! Order book error types.
//!
//! `OrderBookError` is hand-rolled rather than derived via `thiserror`: every
//! variant already echoes the triggering event/id verbatim (spec §7's
//! propagation policy), so a derive buys nothing here. [`crate::feed::DecodeError`]
//! is the crate's one `thiserror` consumer (see its own doc comment).

use crate::types::{OrderId, Price, Side};
use std::fmt;

/// Errors surfaced by [`crate::orderbook::book::OrderBook`] operations.
///
/// Every mutating operation (add/execute/cancel/delete/replace) is atomic
/// from the caller's point of view: on error the book is left exactly as it
/// was before the call was made.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderBookError {
    /// An event referenced an order id absent from the Order Index.
    UnknownOrder {
        /// The id the triggering event referenced.
        order_id: OrderId,
    },

    /// A cancel or execute requested more shares than the resting order (or,
    /// for execute with `lenient_execute = false`, more than the whole
    /// referenced order) actually holds.
    Inconsistent {
        /// The order the event targeted.
        order_id: OrderId,
        /// Shares the event requested.
        requested: u64,
        /// Shares actually resting.
        available: u64,
    },

    /// A price level was referenced that does not exist in the side book.
    InvalidPriceLevel {
        /// The missing price.
        price: Price,
        /// The side book it was looked up in.
        side: Side,
    },

    /// `PriceLevel::add` was called with an order whose price does not match
    /// the level's price.
    PriceMismatch {
        /// The level's price.
        level_price: Price,
        /// The order's price.
        order_price: Price,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::UnknownOrder { order_id } => {
                write!(f, "unknown order: {order_id}")
            }
            OrderBookError::Inconsistent {
                order_id,
                requested,
                available,
            } => {
                write!(
                    f,
                    "inconsistent quantity for order {order_id}: requested {requested}, available {available}"
                )
            }
            OrderBookError::InvalidPriceLevel { price, side } => {
                write!(f, "no {side} level at price {price}")
            }
            OrderBookError::PriceMismatch {
                level_price,
                order_price,
            } => {
                write!(
                    f,
                    "order price {order_price} does not match level price {level_price}"
                )
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
