//! Fuzz target for CSV prediction files with default column names.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mq_core::input::{parse_csv, CsvColumns};

fuzz_target!(|data: &[u8]| {
    let _ = parse_csv(data, &CsvColumns::default());
});
