//! Price Level (spec §4.A).
//!
//! Orders are split across two structures the way the teacher crate's own
//! `OrderQueue` is built (see the "Performance Improvements" note in the
//! crate-level docs): a `HashMap` keyed by order id for O(1) amendment, and a
//! `VecDeque` of ids that carries FIFO time priority. The teacher reaches for
//! `DashMap` + `SegQueue` because its queue is accessed from multiple
//! threads; this engine is single-threaded by spec §5, so the plain std
//! collections are the idiomatic fit here.

use crate::orderbook::error::OrderBookError;
use crate::orderbook::order::Order;
use crate::types::{OrderId, Price};
use std::collections::{HashMap, VecDeque};

/// Outcome of matching against the head of a level (spec §4.A `match_top`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Shares still unfilled after consuming the head order.
    pub remaining: u64,
    /// Whether the head order was fully consumed and removed.
    pub fully_filled: bool,
    /// The id of the head order that was matched.
    pub order_id: OrderId,
    /// Shares executed against the head order by this call.
    pub executed_shares: u64,
}

/// Outcome of executing a specific (not necessarily head) order (spec §4.D
/// `execute_market`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOutcome {
    /// Shares executed against the referenced order.
    pub executed: u64,
    /// Whether the referenced order was fully consumed and removed.
    pub fully_filled: bool,
    /// Shares requested beyond what the referenced order held; zero unless
    /// the event over-fills it (spec §9 "Executions that exceed...").
    pub overflow: u64,
}

/// The set of resting orders at a single price, held in arrival order.
#[derive(Debug)]
pub struct PriceLevel {
    price: Price,
    orders: VecDeque<OrderId>,
    by_id: HashMap<OrderId, Order>,
    total_shares: u64,
}

impl PriceLevel {
    /// Create an empty level at `price`.
    pub fn new(price: Price) -> Self {
        PriceLevel {
            price,
            orders: VecDeque::new(),
            by_id: HashMap::new(),
            total_shares: 0,
        }
    }

    /// The price this level holds orders at.
    pub fn price(&self) -> Price {
        self.price
    }

    /// `num_orders` invariant: `|orders|`.
    pub fn num_orders(&self) -> usize {
        self.orders.len()
    }

    /// `total_shares` invariant: `Σ order.shares`.
    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    /// Whether this level currently holds no orders (spec invariant 2: such
    /// a level must not exist in a side book).
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Append a resting order to the tail (spec §4.A `add`).
    pub fn add(&mut self, order: Order) -> Result<(), OrderBookError> {
        if order.price != self.price {
            return Err(OrderBookError::PriceMismatch {
                level_price: self.price,
                order_price: order.price,
            });
        }
        self.total_shares += order.shares as u64;
        self.orders.push_back(order.id);
        self.by_id.insert(order.id, order);
        Ok(())
    }

    /// Take shares from the head order (spec §4.A `match_top`).
    ///
    /// Panics if the level is empty; callers (`SideBook::match_against`)
    /// always check `is_empty()` first.
    pub fn match_top(&mut self, requested: u64) -> MatchOutcome {
        let head_id = *self
            .orders
            .front()
            .expect("match_top called on an empty level");
        let head_shares = self.by_id[&head_id].shares as u64;
        if head_shares > requested {
            let head = self.by_id.get_mut(&head_id).expect("head present");
            head.shares -= requested as u32;
            self.total_shares -= requested;
            MatchOutcome {
                remaining: 0,
                fully_filled: false,
                order_id: head_id,
                executed_shares: requested,
            }
        } else {
            self.orders.pop_front();
            self.by_id.remove(&head_id);
            self.total_shares -= head_shares;
            MatchOutcome {
                remaining: requested - head_shares,
                fully_filled: true,
                order_id: head_id,
                executed_shares: head_shares,
            }
        }
    }

    /// Execute against a specific order id, which may not be at the head
    /// (spec §4.D `execute_market`, scenario S6).
    pub fn execute(&mut self, id: OrderId, requested: u64) -> Result<ExecuteOutcome, OrderBookError> {
        let order = self
            .by_id
            .get(&id)
            .ok_or(OrderBookError::UnknownOrder { order_id: id })?;
        let available = order.shares as u64;
        if requested < available {
            let order = self.by_id.get_mut(&id).expect("checked above");
            order.shares -= requested as u32;
            self.total_shares -= requested;
            Ok(ExecuteOutcome {
                executed: requested,
                fully_filled: false,
                overflow: 0,
            })
        } else {
            self.remove(id)?;
            Ok(ExecuteOutcome {
                executed: available,
                fully_filled: true,
                overflow: requested - available,
            })
        }
    }

    /// Partial cancel (spec §4.A `reduce`). Does not remove the order even
    /// if its resting quantity reaches zero (spec §9 "Cancel-to-zero").
    pub fn reduce(&mut self, id: OrderId, shares: u64) -> Result<(), OrderBookError> {
        let order = self
            .by_id
            .get_mut(&id)
            .ok_or(OrderBookError::UnknownOrder { order_id: id })?;
        let available = order.shares as u64;
        if shares > available {
            return Err(OrderBookError::Inconsistent {
                order_id: id,
                requested: shares,
                available,
            });
        }
        order.shares -= shares as u32;
        self.total_shares -= shares;
        Ok(())
    }

    /// Remove an order by id, preserving the relative order of the rest
    /// (spec §4.A `remove`).
    pub fn remove(&mut self, id: OrderId) -> Result<Order, OrderBookError> {
        let order = self
            .by_id
            .remove(&id)
            .ok_or(OrderBookError::UnknownOrder { order_id: id })?;
        self.total_shares -= order.shares as u64;
        self.orders.retain(|&oid| oid != id);
        Ok(order)
    }

    /// Look up a resting order by id without mutating the level.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.by_id.get(&id)
    }

    /// Orders in arrival order, head first (used by invariant checks and
    /// depth/order-view queries).
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().map(move |id| &self.by_id[id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn order(id: OrderId, shares: u32, ts: u64) -> Order {
        Order {
            id,
            side: Side::Buy,
            price: 100,
            shares,
            timestamp: ts,
        }
    }

    #[test]
    fn add_accumulates_totals() {
        let mut level = PriceLevel::new(100);
        level.add(order(1, 10, 1)).unwrap();
        level.add(order(2, 20, 2)).unwrap();
        assert_eq!(level.num_orders(), 2);
        assert_eq!(level.total_shares(), 30);
    }

    #[test]
    fn add_rejects_price_mismatch() {
        let mut level = PriceLevel::new(100);
        let mut bad = order(1, 10, 1);
        bad.price = 101;
        assert!(level.add(bad).is_err());
    }

    #[test]
    fn match_top_partial_then_full() {
        let mut level = PriceLevel::new(100);
        level.add(order(1, 50, 1)).unwrap();
        level.add(order(2, 50, 2)).unwrap();

        let out = level.match_top(30);
        assert_eq!(out.remaining, 0);
        assert!(!out.fully_filled);
        assert_eq!(out.order_id, 1);
        assert_eq!(level.total_shares(), 70);
        assert_eq!(level.num_orders(), 2);

        let out = level.match_top(20);
        assert!(out.fully_filled);
        assert_eq!(out.order_id, 1);
        assert_eq!(level.num_orders(), 1);
        assert_eq!(level.total_shares(), 50);
    }

    #[test]
    fn reduce_then_remove_preserves_order() {
        let mut level = PriceLevel::new(100);
        level.add(order(1, 100, 1)).unwrap();
        level.add(order(2, 100, 2)).unwrap();
        level.add(order(3, 100, 3)).unwrap();

        level.reduce(2, 100).unwrap();
        assert_eq!(level.get(2).unwrap().shares, 0);
        assert_eq!(level.num_orders(), 3, "cancel-to-zero does not remove");

        level.remove(2).unwrap();
        let ids: Vec<_> = level.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn execute_hits_non_head_order() {
        let mut level = PriceLevel::new(100);
        level.add(order(50, 100, 1)).unwrap();
        level.add(order(51, 100, 2)).unwrap();
        level.add(order(52, 100, 3)).unwrap();

        let out = level.execute(51, 100).unwrap();
        assert!(out.fully_filled);
        assert_eq!(out.overflow, 0);
        let ids: Vec<_> = level.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![50, 52]);
        assert_eq!(level.total_shares(), 200);
    }

    #[test]
    fn execute_overflow_is_reported() {
        let mut level = PriceLevel::new(100);
        level.add(order(1, 40, 1)).unwrap();
        let out = level.execute(1, 100).unwrap();
        assert!(out.fully_filled);
        assert_eq!(out.executed, 40);
        assert_eq!(out.overflow, 60);
        assert!(level.is_empty());
    }
}
