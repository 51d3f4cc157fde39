//! Fuzz target for JSON prediction files.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(set) = mq_core::input::parse_json(text) {
            // Parsed labels are always binary.
            assert!(set.y_true.iter().all(|&y| y <= 1));
        }
    }
});
