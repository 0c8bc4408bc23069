//! Feed Decoder (spec §4.F): a zero-copy parser for the length-prefixed
//! binary market data stream.
//!
//! Runs in two passes over the same borrowed buffer: [`locate_pass`]
//! (spec §4.F.1) finds the `stock_locate` code for the configured ticker
//! from the stock-directory ('R') records, and [`event_pass`] (spec §4.F.2)
//! decodes every record whose locate code matches into a canonical
//! [`Event`]. Both passes borrow `data` rather than copying it, so the
//! decoder never allocates more than the emitted `Vec<Event>` itself.

use crate::event::Event;
use crate::feed::error::DecodeError;
use crate::types::Side;
use std::collections::HashMap;
use tracing::warn;

const HEADER_LEN: usize = 11; // type(1) + locate(2) + tracking(2) + timestamp(6)

fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([buf[at], buf[at + 1]])
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn read_u48(buf: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes[2..8].copy_from_slice(&buf[at..at + 6]);
    u64::from_be_bytes(bytes)
}

fn read_u64(buf: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[at..at + 8]);
    u64::from_be_bytes(bytes)
}

/// One `(0x00, length, payload)` record, with the absolute file offset its
/// payload starts at (used to locate `DecodeError`s).
struct Record<'a> {
    payload_offset: usize,
    payload: &'a [u8],
}

/// Walk `data` as a sequence of length-prefixed records (spec §4.F framing).
fn records(data: &[u8]) -> impl Iterator<Item = Result<Record<'_>, DecodeError>> {
    let mut pos = 0usize;
    std::iter::from_fn(move || {
        if pos + 2 > data.len() {
            return None;
        }
        let reserved = data[pos];
        if reserved != 0x00 {
            return Some(Err(DecodeError::BadReservedByte {
                offset: pos,
                byte: reserved,
            }));
        }
        let len = data[pos + 1] as usize;
        let payload_offset = pos + 2;
        let payload_end = payload_offset + len;
        if payload_end > data.len() {
            return Some(Err(DecodeError::Truncated {
                offset: pos,
                needed: len,
                available: data.len().saturating_sub(payload_offset),
            }));
        }
        pos = payload_end;
        Some(Ok(Record {
            payload_offset,
            payload: &data[payload_offset..payload_end],
        }))
    })
}

fn need(record: &Record<'_>, len: usize) -> Result<(), DecodeError> {
    if record.payload.len() < len {
        Err(DecodeError::Truncated {
            offset: record.payload_offset,
            needed: len,
            available: record.payload.len(),
        })
    } else {
        Ok(())
    }
}

/// Parses a length-prefixed binary feed into canonical [`Event`]s, filtering
/// by the stock locate code of a single configured ticker.
pub struct FeedDecoder<'a> {
    data: &'a [u8],
    ticker: String,
    strict: bool,
}

impl<'a> FeedDecoder<'a> {
    /// Decode events for `ticker` out of `data`.
    pub fn new(data: &'a [u8], ticker: &str) -> Self {
        FeedDecoder {
            data,
            ticker: ticker.to_string(),
            strict: false,
        }
    }

    /// When `true`, an unrecognised message-type code is a `DecodeError`
    /// rather than a silently skipped record (spec §7).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Run both passes and return the decoded event sequence, in file
    /// order (which is nondecreasing `ts` order, per spec §4.E).
    pub fn decode(&self) -> Result<Vec<Event>, DecodeError> {
        let target_locate = self.locate_pass()?;
        self.event_pass(target_locate)
    }

    /// spec §4.F.1: scan stock-directory ('R') records for `self.ticker`,
    /// aborting on the first 'A' record since the stock directory always
    /// precedes add messages.
    fn locate_pass(&self) -> Result<u16, DecodeError> {
        let wanted = self.ticker.trim_end();
        for record in records(self.data) {
            let record = record?;
            if record.payload.is_empty() {
                continue;
            }
            match record.payload[0] {
                b'R' => {
                    need(&record, 19)?;
                    let locate = read_u16(record.payload, 1);
                    let symbol = &record.payload[HEADER_LEN..HEADER_LEN + 8];
                    let symbol = std::str::from_utf8(symbol).unwrap_or("").trim_end();
                    if symbol == wanted {
                        return Ok(locate);
                    }
                }
                b'A' => break,
                _ => {}
            }
        }
        Err(DecodeError::TickerNotFound {
            ticker: self.ticker.clone(),
        })
    }

    /// spec §4.F.2: decode every record matching `target_locate`, tracking
    /// each live order's resting side in a decoder-local map (spec §9
    /// "Side resolution on Execute").
    fn event_pass(&self, target_locate: u16) -> Result<Vec<Event>, DecodeError> {
        let mut events = Vec::new();
        let mut resting_side: HashMap<u64, Side> = HashMap::new();

        for record in records(self.data) {
            let record = record?;
            if record.payload.len() < HEADER_LEN {
                continue;
            }
            let code = record.payload[0];
            let locate = read_u16(record.payload, 1);
            if locate != target_locate {
                continue;
            }
            let ts = read_u48(record.payload, 5);

            match code {
                b'A' | b'F' => {
                    need(&record, 36)?;
                    let id = read_u64(record.payload, 11);
                    let side_byte = record.payload[19];
                    let side = Side::from_wire_byte(side_byte).ok_or(DecodeError::MalformedField {
                        offset: record.payload_offset + 19,
                        field: "side",
                        byte: side_byte,
                    })?;
                    let shares = read_u32(record.payload, 20);
                    let price = read_u32(record.payload, 32) as u64;
                    resting_side.insert(id, side);
                    events.push(Event::Add { ts, id, side, price, shares });
                }
                b'E' | b'C' => {
                    need(&record, 31)?;
                    let id = read_u64(record.payload, 11);
                    let shares = read_u32(record.payload, 19);
                    let Some(&resting) = resting_side.get(&id) else {
                        warn!(id, "execute references an order with no tracked side, skipping");
                        continue;
                    };
                    events.push(Event::Execute {
                        ts,
                        resting_side: resting,
                        resting_id: id,
                        shares,
                    });
                }
                b'X' => {
                    need(&record, 23)?;
                    let id = read_u64(record.payload, 11);
                    let shares = read_u32(record.payload, 19);
                    events.push(Event::Cancel { ts, id, shares });
                }
                b'D' => {
                    need(&record, 19)?;
                    let id = read_u64(record.payload, 11);
                    resting_side.remove(&id);
                    events.push(Event::Delete { ts, id });
                }
                b'U' => {
                    need(&record, 35)?;
                    let old_id = read_u64(record.payload, 11);
                    let new_id = read_u64(record.payload, 19);
                    let shares = read_u32(record.payload, 27);
                    let price = read_u32(record.payload, 31) as u64;
                    let Some(side) = resting_side.remove(&old_id) else {
                        warn!(old_id, "replace references an order with no tracked side, skipping");
                        continue;
                    };
                    resting_side.insert(new_id, side);
                    events.push(Event::Replace {
                        ts,
                        old_id,
                        new_id,
                        new_price: price,
                        new_shares: shares,
                    });
                }
                b'R' => {}
                other => {
                    if self.strict {
                        return Err(DecodeError::UnknownMessageType {
                            offset: record.payload_offset,
                            code: other as char,
                        });
                    }
                }
            }
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0x00, payload.len() as u8];
        out.extend_from_slice(payload);
        out
    }

    fn r_record(locate: u16, symbol: &str) -> Vec<u8> {
        let mut payload = vec![b'R'];
        payload.extend_from_slice(&locate.to_be_bytes());
        payload.extend_from_slice(&0u16.to_be_bytes()); // tracking
        payload.extend_from_slice(&[0u8; 6]); // timestamp
        let mut sym = symbol.as_bytes().to_vec();
        sym.resize(8, b' ');
        payload.extend_from_slice(&sym);
        record(&payload)
    }

    fn add_record(locate: u16, ts: u64, id: u64, side: u8, shares: u32, price: u32) -> Vec<u8> {
        let mut payload = vec![b'A'];
        payload.extend_from_slice(&locate.to_be_bytes());
        payload.extend_from_slice(&0u16.to_be_bytes());
        payload.extend_from_slice(&ts.to_be_bytes()[2..8]);
        payload.extend_from_slice(&id.to_be_bytes());
        payload.push(side);
        payload.extend_from_slice(&shares.to_be_bytes());
        payload.extend_from_slice(&[b'T'; 8]);
        payload.extend_from_slice(&price.to_be_bytes());
        record(&payload)
    }

    fn delete_record(locate: u16, ts: u64, id: u64) -> Vec<u8> {
        let mut payload = vec![b'D'];
        payload.extend_from_slice(&locate.to_be_bytes());
        payload.extend_from_slice(&0u16.to_be_bytes());
        payload.extend_from_slice(&ts.to_be_bytes()[2..8]);
        payload.extend_from_slice(&id.to_be_bytes());
        record(&payload)
    }

    #[test]
    fn decodes_add_and_delete_for_matching_ticker() {
        let mut data = Vec::new();
        data.extend(r_record(7, "OTHER"));
        data.extend(r_record(42, "TEST"));
        data.extend(add_record(42, 100, 1, b'B', 50, 1_000_000));
        data.extend(add_record(7, 100, 99, b'S', 10, 999)); // different ticker, filtered
        data.extend(delete_record(42, 200, 1));

        let events = FeedDecoder::new(&data, "TEST").decode().unwrap();
        assert_eq!(
            events,
            vec![
                Event::Add { ts: 100, id: 1, side: Side::Buy, price: 1_000_000, shares: 50 },
                Event::Delete { ts: 200, id: 1 },
            ]
        );
    }

    #[test]
    fn ticker_not_found_errors() {
        let mut data = Vec::new();
        data.extend(r_record(1, "OTHER"));
        data.extend(add_record(1, 0, 1, b'B', 1, 1));
        let err = FeedDecoder::new(&data, "TEST").decode().unwrap_err();
        assert_eq!(err, DecodeError::TickerNotFound { ticker: "TEST".into() });
    }

    #[test]
    fn truncated_record_is_reported() {
        let mut data = r_record(1, "TEST");
        data.push(0x00);
        data.push(50); // declares 50 bytes of payload that don't exist
        let err = FeedDecoder::new(&data, "TEST").decode().unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn execute_carries_resting_side_from_add() {
        let mut data = Vec::new();
        data.extend(r_record(1, "TEST"));
        data.extend(add_record(1, 0, 5, b'S', 100, 500));
        let mut execute = vec![b'E'];
        execute.extend_from_slice(&1u16.to_be_bytes());
        execute.extend_from_slice(&0u16.to_be_bytes());
        execute.extend_from_slice(&0u64.to_be_bytes()[2..8]);
        execute.extend_from_slice(&5u64.to_be_bytes());
        execute.extend_from_slice(&30u32.to_be_bytes());
        execute.extend_from_slice(&0u64.to_be_bytes());
        data.extend(record(&execute));

        let events = FeedDecoder::new(&data, "TEST").decode().unwrap();
        assert_eq!(
            events[1],
            Event::Execute { ts: 0, resting_side: Side::Sell, resting_id: 5, shares: 30 }
        );
    }
}
