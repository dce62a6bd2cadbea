//! Fuzz test for the ESENS parser
//!
//! Runs arbitrary UTF-8 through `parse` and checks that failures stay inside
//! the input and that every accepted notation survives both renderers.
//!
//! Run with: cargo +nightly fuzz run parser_fuzz -- -max_total_time=60

#![no_main]

use esens_core::{parse, parse_record, EffectRecord};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        match parse(input, true) {
            Ok(output) => {
                assert!(output.explanation.is_some());
                let rebuilt = EffectRecord::from_structured(output.structured.clone())
                    .expect("structured form should rebuild the record");
                assert_eq!(rebuilt, output.record);

                // Canonical notation must be accepted again.
                let canonical = output.record.to_notation();
                assert!(parse_record(&canonical).is_ok(), "{:?} -> {:?}", input, canonical);
            }
            Err(err) => {
                assert!(!err.message.is_empty(), "Error message should not be empty");
                let offset = err.offset.expect("parse errors carry an offset");
                assert!(offset <= input.len(), "Error offset past end of input");
                let _ = err.diagnostic();
            }
        }
    }
});
