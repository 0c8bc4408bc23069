//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types, traits, and functions from the crate. Instead of importing each
//! type individually:
//!
//! ```rust
//! use lob_replay::prelude::*;
//! ```

// Core order book types
pub use crate::orderbook::{AddReport, OrderBook, OrderBookError, OrderView, ReplayConfig};

// Event and feed types
pub use crate::event::Event;
pub use crate::feed::{DecodeError, FeedDecoder};

// Replay loop
pub use crate::replay::{ReplayError, ReplayLoop, spawn_decoder_thread};

// Primitive value types
pub use crate::types::{ASK_SENTINEL, BID_SENTINEL, OrderId, Price, Shares, Side, Timestamp};
