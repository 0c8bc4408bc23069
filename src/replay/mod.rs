//! Replay Loop (spec §4.G): drains an ordered event sequence, dispatching
//! each to the Order Book.

mod thread;

pub use thread::spawn_decoder_thread;

use crate::event::Event;
use crate::orderbook::{OrderBook, OrderBookError};
use std::fmt;

/// An order-book error, with the event that triggered it (spec §7's
/// propagation policy: "the Order Book surfaces Inconsistent and
/// UnknownOrder with the triggering event echoed").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayError {
    pub event: Event,
    pub source: OrderBookError,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "replay failed on {:?}: {}", self.event, self.source)
    }
}

impl std::error::Error for ReplayError {}

/// Strictly sequential single-threaded event dispatcher (spec §4.G /
/// §5: no event is skipped or reordered, no internal parallelism).
///
/// `pre_event`/`post_event` are no-op optional hooks for consumers, mirroring
/// the teacher crate's boxed-closure trade/price-level listeners.
#[derive(Default)]
pub struct ReplayLoop {
    pre_event: Option<Box<dyn FnMut(&Event)>>,
    post_event: Option<Box<dyn FnMut(&Event, &OrderBook)>>,
}

impl ReplayLoop {
    pub fn new() -> Self {
        ReplayLoop { pre_event: None, post_event: None }
    }

    /// Install a hook run immediately before each event is dispatched.
    pub fn with_pre_event(mut self, hook: impl FnMut(&Event) + 'static) -> Self {
        self.pre_event = Some(Box::new(hook));
        self
    }

    /// Install a hook run immediately after each event is applied.
    pub fn with_post_event(mut self, hook: impl FnMut(&Event, &OrderBook) + 'static) -> Self {
        self.post_event = Some(Box::new(hook));
        self
    }

    /// Drain `events` against `book` in order. Stops at the first error,
    /// per spec §7: "the replay loop treats all order-book errors as fatal
    /// for that run".
    pub fn run(
        &mut self,
        book: &OrderBook,
        events: impl IntoIterator<Item = Event>,
    ) -> Result<(), ReplayError> {
        for event in events {
            if let Some(pre) = self.pre_event.as_mut() {
                pre(&event);
            }
            dispatch(book, event)?;
            if let Some(post) = self.post_event.as_mut() {
                post(&event, book);
            }
        }
        Ok(())
    }
}

/// Apply a single event to `book` (spec §4.D/§4.G dispatch-by-type).
fn dispatch(book: &OrderBook, event: Event) -> Result<(), ReplayError> {
    let result = match event {
        Event::Add { ts, id, side, price, shares } => {
            book.add_limit(id, side, price, shares, ts).map(|_| ())
        }
        Event::Execute { resting_side, resting_id, shares, .. } => {
            book.execute(resting_side, resting_id, shares).map(|_| ())
        }
        Event::Cancel { id, shares, .. } => book.cancel(id, shares),
        Event::Delete { id, .. } => book.delete(id),
        Event::Replace { old_id, new_id, new_price, new_shares, ts } => {
            book.replace(old_id, new_id, new_price, new_shares, ts).map(|_| ())
        }
    };
    result.map_err(|source| ReplayError { event, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn runs_events_in_order_and_invokes_hooks() {
        let book = OrderBook::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_pre = seen.clone();

        let mut replay = ReplayLoop::new().with_pre_event(move |event| {
            seen_pre.borrow_mut().push(event.timestamp());
        });

        let events = vec![
            Event::Add { ts: 1, id: 1, side: Side::Buy, price: 100, shares: 10 },
            Event::Cancel { ts: 2, id: 1, shares: 5 },
        ];
        replay.run(&book, events).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(book.order(1).unwrap().shares, 5);
    }

    #[test]
    fn stops_and_echoes_event_on_first_error() {
        let book = OrderBook::new();
        let mut replay = ReplayLoop::new();
        let events = vec![Event::Delete { ts: 1, id: 404 }];
        let err = replay.run(&book, events).unwrap_err();
        assert_eq!(err.event, Event::Delete { ts: 1, id: 404 });
        assert!(matches!(err.source, OrderBookError::UnknownOrder { order_id: 404 }));
    }
}
