//! Fuzz target for single declarations assembled from plausible pieces.
//!
//! Random bytes rarely get past the package name, so this builds lines that look like
//! `name[extras] <op><version> ; <marker>` and lets the fuzzer mutate each part.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_requirement_line
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

const OPS: &[&str] = &["==", ">=", "<=", "!=", "~=", "===", "<", ">", ""];

#[derive(Arbitrary, Debug)]
struct Line {
    name: String,
    extras: Vec<String>,
    clauses: Vec<(u8, String)>,
    marker: Option<String>,
    url: Option<String>,
}

fuzz_target!(|line: Line| {
    let mut text = line.name;
    if !line.extras.is_empty() {
        text.push('[');
        text.push_str(&line.extras.join(","));
        text.push(']');
    }
    if let Some(url) = line.url {
        text.push_str(" @ ");
        text.push_str(&url);
    } else {
        let clauses: Vec<String> = line
            .clauses
            .iter()
            .map(|(op, version)| format!("{}{}", OPS[*op as usize % OPS.len()], version))
            .collect();
        text.push_str(&clauses.join(","));
    }
    if let Some(marker) = line.marker {
        text.push_str(" ; ");
        text.push_str(&marker);
    }

    let _ = depwhy_parse::fuzz::parse_line(&text);
});
