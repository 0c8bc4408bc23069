//! Producer-thread feed (SPEC_FULL §4.M / spec §5: "The Feed Decoder may
//! run in a producer thread feeding a bounded queue to the replay loop").
//!
//! A plain `std::thread` pumping a `sync_channel`, the synchronous
//! counterpart to the teacher crate's `BookManagerStd::start_trade_processor`
//! (itself a `std::thread` draining a channel into trade listeners). No
//! `tokio` involved: the engine is synchronous per spec §5, so there is no
//! async counterpart to build here.

use crate::event::Event;
use crate::feed::{DecodeError, FeedDecoder};
use std::sync::mpsc::{Receiver, sync_channel};
use std::thread::{self, JoinHandle};

/// Decode `data` for `ticker` on a background thread, streaming the
/// resulting events through a bounded channel of `capacity` slots.
///
/// The order book itself never observes concurrent mutation (spec §5): the
/// channel is the serialisation point between the decoder thread and
/// whichever thread drives [`super::ReplayLoop::run`] over `rx`.
pub fn spawn_decoder_thread(
    data: Vec<u8>,
    ticker: String,
    capacity: usize,
) -> (JoinHandle<Result<(), DecodeError>>, Receiver<Event>) {
    let (tx, rx) = sync_channel(capacity.max(1));
    let handle = thread::spawn(move || {
        let decoder = FeedDecoder::new(&data, &ticker);
        let events = decoder.decode()?;
        for event in events {
            if tx.send(event).is_err() {
                // Receiver dropped; the consumer stopped early, which is
                // not this thread's failure to report.
                break;
            }
        }
        Ok(())
    });
    (handle, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::OrderBook;
    use crate::replay::ReplayLoop;

    fn record(payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0x00, payload.len() as u8];
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn streams_decoded_events_to_the_replay_loop() {
        let mut data = Vec::new();
        let mut r = vec![b'R'];
        r.extend_from_slice(&1u16.to_be_bytes());
        r.extend_from_slice(&0u16.to_be_bytes());
        r.extend_from_slice(&[0u8; 6]);
        let mut sym = b"TEST".to_vec();
        sym.resize(8, b' ');
        r.extend_from_slice(&sym);
        data.extend(record(&r));

        let mut add = vec![b'A'];
        add.extend_from_slice(&1u16.to_be_bytes());
        add.extend_from_slice(&0u16.to_be_bytes());
        add.extend_from_slice(&0u64.to_be_bytes()[2..8]);
        add.extend_from_slice(&7u64.to_be_bytes());
        add.push(b'B');
        add.extend_from_slice(&10u32.to_be_bytes());
        add.extend_from_slice(&[b'T'; 8]);
        add.extend_from_slice(&500u32.to_be_bytes());
        data.extend(record(&add));

        let (handle, rx) = spawn_decoder_thread(data, "TEST".to_string(), 4);
        let book = OrderBook::new();
        ReplayLoop::new().run(&book, rx.iter()).unwrap();
        handle.join().unwrap().unwrap();

        assert_eq!(book.order(7).unwrap().shares, 10);
    }
}
