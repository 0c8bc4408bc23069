//! The resting limit order (spec §3 "Order").

use crate::types::{OrderId, Price, Shares, Side, Timestamp};
use serde::{Deserialize, Serialize};

/// A resting limit order held by a [`super::level::PriceLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Globally unique (within a trading day) identifier.
    pub id: OrderId,
    /// Which side of the book this order rests on.
    pub side: Side,
    /// Fixed-point limit price, in 1/10,000ths of the quote currency.
    pub price: Price,
    /// Resting quantity in shares. Strictly positive while resting, except
    /// transiently after a cancel-to-zero (spec §9 "Cancel-to-zero").
    pub shares: Shares,
    /// Arrival timestamp, nanoseconds since midnight.
    pub timestamp: Timestamp,
}

/// Read-only view of an order returned by [`crate::orderbook::book::OrderBook::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderView {
    /// Side the order rests on.
    pub side: Side,
    /// Fixed-point limit price.
    pub price: Price,
    /// Remaining resting quantity.
    pub shares: Shares,
    /// Arrival timestamp, nanoseconds since midnight.
    pub timestamp: Timestamp,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        OrderView {
            side: order.side,
            price: order.price,
            shares: order.shares,
            timestamp: order.timestamp,
        }
    }
}
