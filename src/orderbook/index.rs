//! Order Index (spec §4.C).
//!
//! A flat `order_id -> (price, side)` map, the same shape as the teacher
//! crate's `order_locations: DashMap<Id, (u128, Side)>` field in `book.rs`.
//! `(price, side)` is enough of a "handle" to relocate an order: `side`
//! picks the bid or ask `SideBook`, `price` picks the `PriceLevel` within
//! it, and the level itself holds the order by id. `DashMap` gives O(1)
//! expected lookups even though this engine only ever touches it from one
//! thread; it is kept because it is the teacher's structure for this exact
//! field, not for any concurrency this crate needs.

use crate::types::{OrderId, Price, Side};
use dashmap::DashMap;

/// Global map from resting order id to its location in the book.
#[derive(Default)]
pub struct OrderIndex {
    locations: DashMap<OrderId, (Price, Side)>,
}

impl OrderIndex {
    pub fn new() -> Self {
        OrderIndex {
            locations: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Record that `order_id` now rests at `(price, side)`.
    pub fn insert(&self, order_id: OrderId, price: Price, side: Side) {
        self.locations.insert(order_id, (price, side));
    }

    /// Look up an order's current location.
    pub fn get(&self, order_id: OrderId) -> Option<(Price, Side)> {
        self.locations.get(&order_id).map(|entry| *entry.value())
    }

    /// Drop an order from the index, returning its last known location.
    pub fn remove(&self, order_id: OrderId) -> Option<(Price, Side)> {
        self.locations.remove(&order_id).map(|(_, loc)| loc)
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.locations.contains_key(&order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove_round_trips() {
        let index = OrderIndex::new();
        index.insert(1, 100, Side::Buy);
        assert_eq!(index.get(1), Some((100, Side::Buy)));
        assert_eq!(index.remove(1), Some((100, Side::Buy)));
        assert_eq!(index.get(1), None);
    }
}
