//! Cross-cutting replay policy (SPEC_FULL §4.H).
//!
//! Threaded through [`super::book::OrderBook`] as a plain `Copy` struct set
//! at construction, the way the teacher crate threads its tick-size/lot-size
//! validation knobs through `OrderBook` as fields rather than as global state.

/// Governs how [`super::book::OrderBook`] reacts to feed inconsistencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayConfig {
    /// When `true` (default), `UnknownOrder` on any operation is a fatal
    /// `OrderBookError`. When `false`, `UnknownOrder` on `Cancel`/`Delete`
    /// is downgraded to a `tracing::warn!` and the event is skipped.
    pub strict: bool,
    /// When `true` (default, matching the source feed's observed
    /// behaviour), an `Execute` that over-fills its referenced order
    /// continues consuming the top of the same side book (spec §9). When
    /// `false`, such an event raises `Inconsistent` instead.
    pub lenient_execute: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            strict: true,
            lenient_execute: true,
        }
    }
}

impl ReplayConfig {
    /// `strict = true`, `lenient_execute = true` — the default, matching
    /// a well-formed exchange feed.
    pub fn strict() -> Self {
        Self::default()
    }

    /// `strict = false`, `lenient_execute = true` — for feeds with known
    /// gaps, per spec §7's "strict/lenient flag".
    pub fn lenient() -> Self {
        ReplayConfig {
            strict: false,
            lenient_execute: true,
        }
    }
}
