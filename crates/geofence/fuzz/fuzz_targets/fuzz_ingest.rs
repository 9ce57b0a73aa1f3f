//! Fuzz target for reading and ingesting delimited exports.
//!
//! Arbitrary bytes go through the delimited parser and then the ingestion
//! pipeline. Neither stage may panic, and accepted geofences keep dense ids.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use geofence::{ingest, Parser};

#[derive(Arbitrary, Debug)]
struct Input {
    delimiter: u8,
    body: Vec<u8>,
}

fuzz_target!(|input: Input| {
    if input.body.len() > 100_000 {
        return;
    }
    let delimiter = match input.delimiter % 4 {
        0 => b',',
        1 => b'\t',
        2 => b';',
        _ => b'|',
    };

    let parser = Parser::new();
    let Ok(table) = parser.parse_bytes(&input.body, delimiter) else {
        return;
    };
    if let Ok(ingestion) = ingest(&table.to_raw_rows()) {
        for (i, geofence) in ingestion.geofences.iter().enumerate() {
            assert_eq!(geofence.id.index(), i);
        }
    }
});
