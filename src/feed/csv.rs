//! Decoded event CSV cache (spec §6, built per SPEC_FULL §4.K).
//!
//! A small positional-CSV codec, not JSON: the wire grammar is fixed and
//! small enough that hand-written `write!`/`split(',')` code is clearer than
//! routing it through `serde_json`, which is why this is the one corner of
//! the crate that deliberately does not reach for `serde`.
//!
//! Columns (no header line), one event per line:
//! - `A,ts,ref,side,price,shares` - `side` is `'B'`/`'S'`
//! - `E,ts,ref,resting_side,shares`
//! - `X,ts,ref,shares`
//! - `D,ts,ref`
//! - `U,ts,new_ref,old_ref,price,shares`

use crate::event::Event;
use crate::types::Side;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Errors parsing a single CSV line back into an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvDecodeError {
    /// The line had the wrong number of comma-separated fields for its tag.
    WrongFieldCount { tag: String, expected: usize, found: usize },
    /// A field failed to parse as the expected integer/side type.
    InvalidField { field: &'static str, value: String },
    /// The leading tag wasn't one of `A`/`E`/`X`/`D`/`U`.
    UnknownTag(String),
}

impl fmt::Display for CsvDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvDecodeError::WrongFieldCount { tag, expected, found } => write!(
                f,
                "event '{tag}' expects {expected} fields, found {found}"
            ),
            CsvDecodeError::InvalidField { field, value } => {
                write!(f, "invalid value for field {field}: {value:?}")
            }
            CsvDecodeError::UnknownTag(tag) => write!(f, "unknown event tag: {tag:?}"),
        }
    }
}

impl std::error::Error for CsvDecodeError {}

/// Write `events` as the positional CSV cache format, one per line.
pub fn encode<W: Write>(events: &[Event], mut out: W) -> io::Result<()> {
    for event in events {
        writeln!(out, "{}", encode_line(event))?;
    }
    Ok(())
}

/// Render a single event as one CSV line (no trailing newline).
pub fn encode_line(event: &Event) -> String {
    match *event {
        Event::Add { ts, id, side, price, shares } => {
            format!("A,{ts},{id},{},{price},{shares}", side.to_wire_byte() as char)
        }
        Event::Execute { ts, resting_side, resting_id, shares } => {
            format!("E,{ts},{resting_id},{},{shares}", resting_side.to_wire_byte() as char)
        }
        Event::Cancel { ts, id, shares } => format!("X,{ts},{id},{shares}"),
        Event::Delete { ts, id } => format!("D,{ts},{id}"),
        Event::Replace { ts, old_id, new_id, new_price, new_shares } => {
            format!("U,{ts},{new_id},{old_id},{new_price},{new_shares}")
        }
    }
}

/// Read events back out of the positional CSV cache format.
pub fn decode<R: BufRead>(input: R) -> Result<Vec<Event>, CsvDecodeError> {
    input
        .lines()
        .map(|line| line.unwrap_or_default())
        .filter(|line| !line.is_empty())
        .map(|line| decode_line(&line))
        .collect()
}

/// Parse a single CSV line into an [`Event`].
pub fn decode_line(line: &str) -> Result<Event, CsvDecodeError> {
    let fields: Vec<&str> = line.split(',').collect();
    let tag = fields[0];

    fn parse<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, CsvDecodeError> {
        value.parse().map_err(|_| CsvDecodeError::InvalidField { field, value: value.to_string() })
    }

    fn parse_side(value: &str) -> Result<Side, CsvDecodeError> {
        value
            .as_bytes()
            .first()
            .copied()
            .and_then(Side::from_wire_byte)
            .ok_or_else(|| CsvDecodeError::InvalidField { field: "side", value: value.to_string() })
    }

    match tag {
        "A" => {
            if fields.len() != 6 {
                return Err(CsvDecodeError::WrongFieldCount { tag: tag.into(), expected: 6, found: fields.len() });
            }
            Ok(Event::Add {
                ts: parse("ts", fields[1])?,
                id: parse("id", fields[2])?,
                side: parse_side(fields[3])?,
                price: parse("price", fields[4])?,
                shares: parse("shares", fields[5])?,
            })
        }
        "E" => {
            if fields.len() != 5 {
                return Err(CsvDecodeError::WrongFieldCount { tag: tag.into(), expected: 5, found: fields.len() });
            }
            Ok(Event::Execute {
                ts: parse("ts", fields[1])?,
                resting_id: parse("resting_id", fields[2])?,
                resting_side: parse_side(fields[3])?,
                shares: parse("shares", fields[4])?,
            })
        }
        "X" => {
            if fields.len() != 4 {
                return Err(CsvDecodeError::WrongFieldCount { tag: tag.into(), expected: 4, found: fields.len() });
            }
            Ok(Event::Cancel {
                ts: parse("ts", fields[1])?,
                id: parse("id", fields[2])?,
                shares: parse("shares", fields[3])?,
            })
        }
        "D" => {
            if fields.len() != 3 {
                return Err(CsvDecodeError::WrongFieldCount { tag: tag.into(), expected: 3, found: fields.len() });
            }
            Ok(Event::Delete {
                ts: parse("ts", fields[1])?,
                id: parse("id", fields[2])?,
            })
        }
        "U" => {
            if fields.len() != 6 {
                return Err(CsvDecodeError::WrongFieldCount { tag: tag.into(), expected: 6, found: fields.len() });
            }
            Ok(Event::Replace {
                ts: parse("ts", fields[1])?,
                new_id: parse("new_id", fields[2])?,
                old_id: parse("old_id", fields[3])?,
                new_price: parse("new_price", fields[4])?,
                new_shares: parse("new_shares", fields[5])?,
            })
        }
        other => Err(CsvDecodeError::UnknownTag(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_events() -> Vec<Event> {
        vec![
            Event::Add { ts: 1, id: 10, side: Side::Buy, price: 1_000_000, shares: 100 },
            Event::Execute { ts: 2, resting_side: Side::Buy, resting_id: 10, shares: 40 },
            Event::Cancel { ts: 3, id: 10, shares: 20 },
            Event::Delete { ts: 4, id: 10 },
            Event::Replace { ts: 5, old_id: 11, new_id: 12, new_price: 999_000, new_shares: 50 },
        ]
    }

    #[test]
    fn round_trips_every_variant() {
        let events = sample_events();
        let mut buf = Vec::new();
        encode(&events, &mut buf).unwrap();
        let decoded = decode(buf.as_slice()).unwrap();
        assert_eq!(decoded, events);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(matches!(
            decode_line("A,1,2,B,3"),
            Err(CsvDecodeError::WrongFieldCount { .. })
        ));
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!(matches!(decode_line("Z,1,2"), Err(CsvDecodeError::UnknownTag(_))));
    }
}
