//! # Limit Order Book Replay Engine
//!
//! A price-time-priority limit order book, paired with a zero-copy decoder
//! for a length-prefixed, fixed-schema binary market data feed (NASDAQ
//! TotalView-ITCH 5.0 framing), and a single-threaded replay loop that
//! drives decoded events into the book.
//!
//! ## Components
//!
//! - [`orderbook::level::PriceLevel`] - the FIFO queue of resting orders at
//!   one price.
//! - [`orderbook::side_book::SideBook`] - the price-ordered map for one side
//!   of the book, with matching against the opposite side.
//! - [`orderbook::index::OrderIndex`] - the global `order_id -> (price,
//!   side)` map used for O(1) amendment.
//! - [`orderbook::book::OrderBook`] - composes the above into
//!   add/execute/cancel/delete/replace and the top-of-book/depth/order
//!   queries.
//! - [`event::Event`] - the tagged union of the five canonical events.
//! - [`feed::decoder::FeedDecoder`] - parses the raw binary feed into
//!   `Event`s, filtered by stock locate.
//! - [`feed::csv`] - the intermediate decoded-event CSV cache between the
//!   decoder and the replay loop.
//! - [`replay::ReplayLoop`] - drains an ordered event sequence into an
//!   `OrderBook`, with optional pre/post-event hooks.
//!
//! ## Concurrency
//!
//! The engine is single-threaded and synchronous: the replay loop owns the
//! `OrderBook` exclusively for the run's duration. [`replay::spawn_decoder_thread`]
//! lets the feed decoder run on its own producer thread, feeding a bounded
//! channel that the replay loop drains -- the channel is the only
//! serialisation point, and the book itself never observes concurrent
//! mutation.
//!
//! ## Out of scope
//!
//! Ticker/date selection, persistence of decoded event streams beyond the
//! CSV cache above, statistics/progress reporting, and strategy simulation
//! are external collaborators, not part of this crate.

pub mod event;
pub mod feed;
pub mod orderbook;
pub mod prelude;
pub mod replay;
pub mod types;

pub use event::Event;
pub use feed::{DecodeError, FeedDecoder};
pub use orderbook::{AddReport, OrderBook, OrderBookError, OrderView, ReplayConfig};
pub use replay::{ReplayError, ReplayLoop, spawn_decoder_thread};
pub use types::{ASK_SENTINEL, BID_SENTINEL, OrderId, Price, Shares, Side, Timestamp};
