//! Feed decode errors (spec §7).
//!
//! The one `thiserror`-derived enum in the crate (see
//! [`crate::orderbook::error::OrderBookError`]'s doc comment for why it
//! isn't): the decoder's variants are simple, uniformly-shaped "here's what
//! went wrong and where", which is exactly what `#[error("...")]` templates
//! are for, and the corpus (river-walras, nautilus_trader) leans on
//! `thiserror` for this kind of parse-error enum.

use thiserror::Error;

/// Errors raised while decoding the length-prefixed binary feed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The record framing (`0x00`, length, payload) ran past the end of
    /// the buffer.
    #[error("truncated record at byte offset {offset}: need {needed} bytes, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The record's reserved first byte was not `0x00`.
    #[error("malformed record at byte offset {offset}: reserved byte is 0x{byte:02x}, expected 0x00")]
    BadReservedByte { offset: usize, byte: u8 },

    /// A fixed-width field failed to parse (currently only `side`, which
    /// must be ASCII `'B'` or `'S'`).
    #[error("malformed field at byte offset {offset}: {field} has invalid value 0x{byte:02x}")]
    MalformedField {
        offset: usize,
        field: &'static str,
        byte: u8,
    },

    /// Strict decoding was requested and a message type code was not one
    /// of the five recognised letters.
    #[error("unknown message type '{code}' at byte offset {offset}")]
    UnknownMessageType { offset: usize, code: char },

    /// The locate pass completed without finding a stock-directory record
    /// for the configured ticker.
    #[error("ticker {ticker:?} not found in stock directory")]
    TickerNotFound { ticker: String },
}
