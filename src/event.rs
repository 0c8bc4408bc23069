//! Event Types (spec §4.E): the tagged union the Feed Decoder emits and the
//! Replay Loop dispatches.

use crate::types::{OrderId, Price, Shares, Side, Timestamp};
use serde::{Deserialize, Serialize};

/// A single canonical market event, decoded from one feed record.
///
/// `ts` is nanoseconds since midnight; events are consumed in nondecreasing
/// `ts` order by the [`crate::replay::ReplayLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A new resting limit order.
    Add {
        ts: Timestamp,
        id: OrderId,
        side: Side,
        price: Price,
        shares: Shares,
    },
    /// An exchange-reported fill against a specific resting order.
    /// `resting_side` is the side the referenced order rests on, not the
    /// submitter's side.
    Execute {
        ts: Timestamp,
        resting_side: Side,
        resting_id: OrderId,
        shares: Shares,
    },
    /// A partial cancel of a resting order.
    Cancel {
        ts: Timestamp,
        id: OrderId,
        shares: Shares,
    },
    /// Full removal of a resting order.
    Delete { ts: Timestamp, id: OrderId },
    /// Replace `old_id` with a new order `new_id` at `new_price`/`new_shares`,
    /// inheriting the old order's side.
    Replace {
        ts: Timestamp,
        old_id: OrderId,
        new_id: OrderId,
        new_price: Price,
        new_shares: Shares,
    },
}

impl Event {
    /// The event's timestamp, common to every variant.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Event::Add { ts, .. }
            | Event::Execute { ts, .. }
            | Event::Cancel { ts, .. }
            | Event::Delete { ts, .. }
            | Event::Replace { ts, .. } => *ts,
        }
    }

    /// Single-letter type tag, matching the CSV cache's leading column
    /// (spec §6).
    pub fn type_tag(&self) -> char {
        match self {
            Event::Add { .. } => 'A',
            Event::Execute { .. } => 'E',
            Event::Cancel { .. } => 'X',
            Event::Delete { .. } => 'D',
            Event::Replace { .. } => 'U',
        }
    }
}
