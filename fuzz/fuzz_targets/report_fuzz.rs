//! Fuzz test for gap report parsing and rendering
//!
//! Feeds arbitrary bytes through decode → validate → render to find panics
//! on hostile input.
//!
//! Run with: cargo +nightly fuzz run report_fuzz -- -max_total_time=60

#![no_main]

use gapticket_core::{parse_report, render_description, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(input) {
        // Never more than one message per required field.
        assert!(validate(&value).len() <= 5);
    }

    if let Ok(report) = parse_report(input) {
        let body = render_description(&report);
        assert!(body.starts_with("h2. "));
        assert!(body.ends_with(" days"));
        assert_eq!(body, render_description(&report));
    }
});
