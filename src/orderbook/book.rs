//! Order Book (spec §4.D): composes the bid/ask side books and the Order
//! Index, and implements the five mutating operations plus the queries of
//! spec §6.

use crate::orderbook::config::ReplayConfig;
use crate::orderbook::error::OrderBookError;
use crate::orderbook::index::OrderIndex;
use crate::orderbook::order::{Order, OrderView};
use crate::orderbook::side_book::SideBook;
use crate::types::{OrderId, Price, Shares, Side, Timestamp};
use tracing::{trace, warn};

/// Shares executed and whether the submitted order rested, returned by
/// [`OrderBook::add_limit`]/[`OrderBook::replace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    /// `(order_id, executed_shares)` pairs for every resting order matched.
    pub fills: Vec<(OrderId, u64)>,
    /// Whether the submitted order (or its residual) now rests in the book.
    pub rested: bool,
}

/// A price-time-priority limit order book for one instrument.
pub struct OrderBook {
    bids: SideBook,
    asks: SideBook,
    index: OrderIndex,
    config: ReplayConfig,
}

impl OrderBook {
    /// An empty book under the default (strict) [`ReplayConfig`].
    pub fn new() -> Self {
        Self::with_config(ReplayConfig::default())
    }

    /// An empty book under an explicit [`ReplayConfig`].
    pub fn with_config(config: ReplayConfig) -> Self {
        OrderBook {
            bids: SideBook::new(Side::Buy),
            asks: SideBook::new(Side::Sell),
            index: OrderIndex::new(),
            config,
        }
    }

    fn side_book(&self, side: Side) -> &SideBook {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn opposite_book(&self, side: Side) -> &SideBook {
        self.side_book(side.opposite())
    }

    // ---- queries (spec §6) -------------------------------------------------

    /// Best bid, or [`crate::types::BID_SENTINEL`] when the bid side is empty.
    pub fn best_bid(&self) -> Price {
        self.bids.best_quote_or_sentinel()
    }

    /// Best ask, or [`crate::types::ASK_SENTINEL`] when the ask side is empty.
    pub fn best_ask(&self) -> Price {
        self.asks.best_quote_or_sentinel()
    }

    /// Ordered `(price_in_currency, total_shares)` pairs from best outward
    /// for `side` (spec §6: `price_in_currency = price / 10000`).
    pub fn depth(&self, side: Side) -> Vec<(f64, u64)> {
        self.side_book(side).depth()
    }

    /// The resting state of `id`, if it still rests in the book.
    pub fn order(&self, id: OrderId) -> Option<OrderView> {
        let (price, side) = self.index.get(id)?;
        self.side_book(side)
            .with_level_mut(price, |level| Ok(level.get(id).copied()))
            .ok()
            .flatten()
            .map(OrderView::from)
    }

    /// Number of orders resting anywhere in the book.
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    // ---- mutating operations (spec §4.D) -----------------------------------

    /// Add a limit order, crossing the spread first if it is marketable.
    pub fn add_limit(
        &self,
        id: OrderId,
        side: Side,
        price: Price,
        shares: Shares,
        timestamp: Timestamp,
    ) -> Result<AddReport, OrderBookError> {
        let marketable = match side {
            Side::Buy => price >= self.asks.best_quote_or_sentinel(),
            Side::Sell => price <= self.bids.best_quote_or_sentinel(),
        };

        if !marketable {
            trace!(id, %side, price, shares, "resting non-marketable limit order");
            self.rest(Order { id, side, price, shares, timestamp });
            return Ok(AddReport { fills: Vec::new(), rested: true });
        }

        trace!(id, %side, price, shares, "limit order is marketable, matching");
        let report = self.opposite_book(side).match_against(shares as u64, Some(price));
        for filled_id in &report.fully_filled {
            self.index.remove(*filled_id);
        }

        let rested = report.remaining > 0;
        if rested {
            self.rest(Order {
                id,
                side,
                price,
                shares: report.remaining as Shares,
                timestamp,
            });
        }
        Ok(AddReport { fills: report.fills, rested })
    }

    fn rest(&self, order: Order) {
        self.side_book(order.side).rest(order);
        self.index.insert(order.id, order.price, order.side);
    }

    /// Apply an exchange-reported execution against a specific resting
    /// order (spec §4.D `execute_market`).
    pub fn execute(
        &self,
        resting_side: Side,
        resting_id: OrderId,
        shares: Shares,
    ) -> Result<Vec<(OrderId, u64)>, OrderBookError> {
        let Some((price, located_side)) = self.index.get(resting_id) else {
            return Err(OrderBookError::UnknownOrder { order_id: resting_id });
        };
        debug_assert_eq!(located_side, resting_side, "feed's resting_side disagrees with the index");
        let side_book = self.side_book(resting_side);
        let requested = shares as u64;

        // Validate against strict mode before committing any mutation: per
        // the error-type doc comment, every operation is atomic from the
        // caller's view, so a rejected event must leave the referenced
        // order, its level, and the index untouched.
        if !self.config.lenient_execute {
            let available = side_book.with_level_mut(price, |level| {
                level
                    .get(resting_id)
                    .map(|order| order.shares as u64)
                    .ok_or(OrderBookError::UnknownOrder { order_id: resting_id })
            })?;
            if requested > available {
                return Err(OrderBookError::Inconsistent {
                    order_id: resting_id,
                    requested,
                    available,
                });
            }
        }

        let outcome = side_book.with_level_mut(price, |level| level.execute(resting_id, requested))?;
        let mut fills = vec![(resting_id, outcome.executed)];

        if outcome.fully_filled {
            self.index.remove(resting_id);
            if let Ok(true) = side_book.with_level_mut(price, |level| Ok(level.is_empty())) {
                side_book.remove_level(price);
            }
        }

        if outcome.overflow > 0 {
            // Reached only under lenient_execute: the strict-mode check
            // above already rejected this event before any mutation ran.
            warn!(
                resting_id,
                overflow = outcome.overflow,
                "execute exceeded referenced order, continuing into top of book"
            );
            let continuation = side_book.match_against(outcome.overflow, None);
            for filled_id in &continuation.fully_filled {
                self.index.remove(*filled_id);
            }
            fills.extend(continuation.fills);
        }

        trace!(resting_id, %resting_side, shares, "executed");
        Ok(fills)
    }

    /// Partial cancel of `shares` from `id` (spec §4.D `cancel`).
    pub fn cancel(&self, id: OrderId, shares: Shares) -> Result<(), OrderBookError> {
        let Some((price, side)) = self.index.get(id) else {
            return self.unknown_order_on_cancel_or_delete(id, "cancel");
        };
        self.side_book(side)
            .with_level_mut(price, |level| level.reduce(id, shares as u64))?;
        trace!(id, %side, shares, "cancelled");
        Ok(())
    }

    /// Full removal of `id` (spec §4.D `delete`).
    pub fn delete(&self, id: OrderId) -> Result<(), OrderBookError> {
        let Some((price, side)) = self.index.get(id) else {
            return self.unknown_order_on_cancel_or_delete(id, "delete");
        };
        let side_book = self.side_book(side);
        let emptied = side_book.with_level_mut(price, |level| {
            level.remove(id)?;
            Ok(level.is_empty())
        })?;
        self.index.remove(id);
        if emptied {
            side_book.remove_level(price);
        }
        trace!(id, %side, "deleted");
        Ok(())
    }

    fn unknown_order_on_cancel_or_delete(&self, id: OrderId, op: &str) -> Result<(), OrderBookError> {
        if self.config.strict {
            Err(OrderBookError::UnknownOrder { order_id: id })
        } else {
            warn!(id, op, "unknown order in lenient mode, skipping");
            Ok(())
        }
    }

    /// Delete `old_id` and add a new limit order inheriting its side (spec
    /// §4.D `replace`). The replacement follows the full crossing check of
    /// [`Self::add_limit`].
    pub fn replace(
        &self,
        old_id: OrderId,
        new_id: OrderId,
        new_price: Price,
        new_shares: Shares,
        timestamp: Timestamp,
    ) -> Result<AddReport, OrderBookError> {
        let Some((_, side)) = self.index.get(old_id) else {
            return Err(OrderBookError::UnknownOrder { order_id: old_id });
        };
        self.delete(old_id)?;
        trace!(old_id, new_id, "replaced");
        self.add_limit(new_id, side, new_price, new_shares, timestamp)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
