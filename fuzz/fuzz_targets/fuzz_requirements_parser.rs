//! Fuzz target for whole requirements files.
//!
//! Goal: neither entry point should **ever panic**; bad lines become conflict records.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_requirements_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = depwhy_parse::fuzz::parse_text(text);
    }
});
