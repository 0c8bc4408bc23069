//! Thin binary exercising the library end to end: decode a raw feed file for
//! one ticker, replay it into an `OrderBook`, and print the resulting top of
//! book. Not the deliverable -- ticker/date selection, statistics and
//! progress reporting belong to an external driver (spec §1 "Out of scope").

use lob_replay::prelude::*;
use std::env;
use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let (Some(path), Some(ticker)) = (args.next(), args.next()) else {
        eprintln!("usage: replay-demo <feed-file> <ticker>");
        return ExitCode::FAILURE;
    };

    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let events = match FeedDecoder::new(&data, &ticker).decode() {
        Ok(events) => events,
        Err(err) => {
            eprintln!("failed to decode feed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let book = OrderBook::new();
    let mut replay = ReplayLoop::new();
    if let Err(err) = replay.run(&book, events) {
        eprintln!("replay failed: {err}");
        return ExitCode::FAILURE;
    }

    println!("best bid: {}", book.best_bid());
    println!("best ask: {}", book.best_ask());
    println!("bid depth: {:?}", book.depth(Side::Buy));
    println!("ask depth: {:?}", book.depth(Side::Sell));

    if args.next().as_deref() == Some("--json") {
        let summary = serde_json::json!({
            "best_bid": book.best_bid(),
            "best_ask": book.best_ask(),
            "bid_depth": book.depth(Side::Buy),
            "ask_depth": book.depth(Side::Sell),
        });
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    }

    ExitCode::SUCCESS
}
