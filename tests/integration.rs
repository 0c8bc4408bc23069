//! Cross-module scenarios from spec §8: round-trip/idempotence laws and
//! boundary behaviours, exercised through the public crate surface rather
//! than `OrderBook`'s internals.

use lob_replay::prelude::*;

#[test]
fn add_then_delete_restores_prior_state_for_non_marketable_order() {
    let book = OrderBook::new();
    book.add_limit(1, Side::Sell, 200, 30, 1).unwrap();
    let before = book.depth(Side::Sell);

    book.add_limit(2, Side::Buy, 100, 50, 2).unwrap();
    book.delete(2).unwrap();

    assert_eq!(book.depth(Side::Sell), before);
    assert_eq!(book.best_bid(), BID_SENTINEL);
    assert!(book.order(2).is_none());
}

#[test]
fn marketable_limit_that_fully_sweeps_the_opposite_side() {
    let book = OrderBook::new();
    book.add_limit(1, Side::Sell, 100, 50, 1).unwrap();
    book.add_limit(2, Side::Sell, 101, 50, 2).unwrap();

    let report = book.add_limit(3, Side::Buy, 101, 100, 3).unwrap();

    assert!(!report.rested);
    assert_eq!(report.fills, vec![(1, 50), (2, 50)]);
    assert_eq!(book.best_ask(), ASK_SENTINEL);
    assert_eq!(book.depth(Side::Sell), vec![]);
}

#[test]
fn decoder_csv_round_trip_over_a_synthetic_sequence() {
    let events = vec![
        Event::Add { ts: 1, id: 1, side: Side::Buy, price: 1_000_000, shares: 100 },
        Event::Execute { ts: 2, resting_side: Side::Buy, resting_id: 1, shares: 40 },
        Event::Cancel { ts: 3, id: 1, shares: 10 },
        Event::Replace { ts: 4, old_id: 1, new_id: 2, new_price: 999_000, new_shares: 50 },
        Event::Delete { ts: 5, id: 2 },
    ];

    let mut buf = Vec::new();
    lob_replay::feed::csv::encode(&events, &mut buf).unwrap();
    let decoded = lob_replay::feed::csv::decode(buf.as_slice()).unwrap();

    assert_eq!(decoded, events);
}

#[test]
fn replaying_the_csv_cache_reproduces_direct_replay() {
    let events = vec![
        Event::Add { ts: 1, id: 10, side: Side::Buy, price: 1_000_000, shares: 100 },
        Event::Add { ts: 2, id: 11, side: Side::Sell, price: 1_000_500, shares: 50 },
        Event::Execute { ts: 3, resting_side: Side::Buy, resting_id: 10, shares: 30 },
        Event::Cancel { ts: 4, id: 10, shares: 20 },
    ];

    let direct_book = OrderBook::new();
    ReplayLoop::new().run(&direct_book, events.clone()).unwrap();

    let mut buf = Vec::new();
    lob_replay::feed::csv::encode(&events, &mut buf).unwrap();
    let cached_events = lob_replay::feed::csv::decode(buf.as_slice()).unwrap();

    let cached_book = OrderBook::new();
    ReplayLoop::new().run(&cached_book, cached_events).unwrap();

    assert_eq!(direct_book.best_bid(), cached_book.best_bid());
    assert_eq!(direct_book.best_ask(), cached_book.best_ask());
    assert_eq!(direct_book.depth(Side::Buy), cached_book.depth(Side::Buy));
}

#[test]
fn execute_overflow_cleans_up_order_index() {
    let book = OrderBook::new();
    book.add_limit(1, Side::Buy, 100, 30, 1).unwrap();
    book.add_limit(2, Side::Buy, 99, 30, 2).unwrap();
    book.add_limit(3, Side::Buy, 98, 30, 3).unwrap();

    let fills = book.execute(Side::Buy, 1, 100).unwrap();
    assert_eq!(fills, vec![(1, 30), (2, 30), (3, 30)]);
    assert!(book.order(1).is_none());
    assert!(book.order(2).is_none());
    assert!(book.order(3).is_none());
    assert_eq!(book.best_bid(), BID_SENTINEL);
}

#[test]
fn order_view_serializes_to_json() {
    let book = OrderBook::new();
    book.add_limit(1, Side::Buy, 1_000_000, 70, 1).unwrap();
    let view = book.order(1).unwrap();
    let json = serde_json::to_string(&view).unwrap();
    let back: OrderView = serde_json::from_str(&json).unwrap();
    assert_eq!(back, view);
}
