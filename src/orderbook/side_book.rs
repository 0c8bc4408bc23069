//! Side Book (spec §4.B).
//!
//! One `SkipMap<Price, Mutex<PriceLevel>>` per side, exactly the teacher
//! crate's own `bids`/`asks` fields (`crossbeam_skiplist::SkipMap<u128,
//! Arc<PriceLevel>>` in its `book.rs`). `SkipMap` keeps keys sorted, so
//! best-price access is `front()`/`back()` and insert/remove is O(log P)
//! without a separate sorted index. The teacher's own `PriceLevel` is
//! internally lock-free; this crate's [`PriceLevel`](super::level::PriceLevel)
//! is a plain single-threaded struct, so each slot is wrapped in a `Mutex`
//! to get interior mutability through `SkipMap`'s shared-reference API (the
//! engine is single-threaded per spec §5, so the lock is never contended).

use crate::orderbook::error::OrderBookError;
use crate::orderbook::level::PriceLevel;
use crate::types::{ASK_SENTINEL, BID_SENTINEL, Price, Side, price_to_currency};
use crossbeam_skiplist::SkipMap;
use std::sync::Mutex;

/// Fully-executed order ids and partial fills produced by [`SideBook::match_against`].
#[derive(Debug, Default)]
pub struct MatchReport {
    /// Ids that were fully consumed and must be unlinked from the Order Index.
    pub fully_filled: Vec<u64>,
    /// `(order_id, executed_shares)` pairs, in match order, for auditing.
    pub fills: Vec<(u64, u64)>,
    /// Shares left unexecuted once the loop stopped (out of book, or hit
    /// the limit price).
    pub remaining: u64,
}

/// One side (bid or ask) of the order book.
///
/// `side` names which side this book holds resting orders for: `Buy` for
/// the bid book (best = highest price), `Sell` for the ask book (best =
/// lowest price). A single generic type serves both, per spec §9's
/// "do not subclass" note — orientation lives in one field, not in the type.
pub struct SideBook {
    side: Side,
    levels: SkipMap<Price, Mutex<PriceLevel>>,
}

impl SideBook {
    /// An empty side book for `side`.
    pub fn new(side: Side) -> Self {
        SideBook {
            side,
            levels: SkipMap::new(),
        }
    }

    /// The side this book holds resting orders for.
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Best quote, or `None` if the side holds no resting orders.
    pub fn best_quote(&self) -> Option<Price> {
        match self.side {
            Side::Buy => self.levels.back().map(|e| *e.key()),
            Side::Sell => self.levels.front().map(|e| *e.key()),
        }
    }

    /// Best quote, falling back to the side's sentinel when empty. Exists
    /// purely so the crossing check in [`super::book::OrderBook::add_limit`]
    /// can stay a single numeric comparison, per spec §9's note that
    /// sentinels should live only at that layer.
    pub fn best_quote_or_sentinel(&self) -> Price {
        self.best_quote().unwrap_or(match self.side {
            Side::Buy => BID_SENTINEL,
            Side::Sell => ASK_SENTINEL,
        })
    }

    /// Ordered `(price_in_currency, total_shares)` pairs from best outward
    /// (spec §4.B `depth`, spec §6 `price_in_currency = price / 10000`).
    pub fn depth(&self) -> Vec<(f64, u64)> {
        self.iter_best_to_worst()
            .map(|entry| {
                let shares = entry.value().lock().expect("level mutex poisoned").total_shares();
                (price_to_currency(*entry.key()), shares)
            })
            .collect()
    }

    fn iter_best_to_worst(&self) -> Box<dyn DoubleEndedIterator<Item = crossbeam_skiplist::map::Entry<'_, Price, Mutex<PriceLevel>>> + '_> {
        match self.side {
            Side::Sell => Box::new(self.levels.iter()),
            Side::Buy => Box::new(self.levels.iter().rev()),
        }
    }

    /// Return the existing level at `price`, creating an empty one if absent
    /// (spec §4.B `ensure_level`).
    pub fn ensure_level(&self, price: Price) {
        if self.levels.get(&price).is_none() {
            self.levels.get_or_insert(price, Mutex::new(PriceLevel::new(price)));
        }
    }

    /// Remove the level at `price` from the key set (spec §4.B `remove_level`).
    pub fn remove_level(&self, price: Price) {
        self.levels.remove(&price);
    }

    /// Run `f` against the level at `price`, failing with
    /// [`OrderBookError::InvalidPriceLevel`] if it does not exist.
    pub fn with_level_mut<R>(
        &self,
        price: Price,
        f: impl FnOnce(&mut PriceLevel) -> Result<R, OrderBookError>,
    ) -> Result<R, OrderBookError> {
        let entry = self
            .levels
            .get(&price)
            .ok_or(OrderBookError::InvalidPriceLevel {
                price,
                side: self.side,
            })?;
        let mut level = entry.value().lock().expect("level mutex poisoned");
        f(&mut level)
    }

    /// Append `order` to its price level, creating the level if needed.
    /// Does not touch the Order Index; callers own that bookkeeping.
    pub fn rest(&self, order: crate::orderbook::order::Order) {
        self.ensure_level(order.price);
        self.with_level_mut(order.price, |level| level.add(order))
            .expect("level just ensured");
    }

    /// Consume resting liquidity from best price outward (spec §4.B `match`).
    ///
    /// Stops when `requested_shares` reaches zero, when the book empties, or
    /// when the best remaining price would be outside `limit_price` (a BUY
    /// crossing the ASK stops once `best_ask > limit`; a SELL crossing the
    /// BID stops once `best_bid < limit`). `limit_price = None` matches
    /// until shares or book liquidity runs out, for `execute_market`'s
    /// overflow continuation.
    pub fn match_against(&self, requested_shares: u64, limit_price: Option<Price>) -> MatchReport {
        let mut remaining = requested_shares;
        let mut report = MatchReport::default();
        let mut emptied_levels = Vec::new();

        for entry in self.iter_best_to_worst() {
            if remaining == 0 {
                break;
            }
            let price = *entry.key();
            if let Some(limit) = limit_price {
                let outside_limit = match self.side {
                    Side::Sell => price > limit,
                    Side::Buy => price < limit,
                };
                if outside_limit {
                    break;
                }
            }

            let mut level = entry.value().lock().expect("level mutex poisoned");
            while remaining > 0 && !level.is_empty() {
                let outcome = level.match_top(remaining);
                report.fills.push((outcome.order_id, outcome.executed_shares));
                if outcome.fully_filled {
                    report.fully_filled.push(outcome.order_id);
                }
                remaining = outcome.remaining;
            }
            if level.is_empty() {
                emptied_levels.push(price);
            }
        }

        for price in emptied_levels {
            self.remove_level(price);
        }
        report.remaining = remaining;
        report
    }
}
