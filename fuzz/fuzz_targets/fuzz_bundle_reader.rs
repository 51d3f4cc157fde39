//! Fuzz target for .mqb bundle reading.
//!
//! Bundles are shared between machines, so opening and verifying one must
//! never panic on arbitrary bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mq_bundle::BundleReader;

fuzz_target!(|data: &[u8]| {
    // Most random data is not a ZIP archive and fails fast.
    if let Ok(mut reader) = BundleReader::from_bytes(data.to_vec()) {
        let _ = reader.verify_all();
        let _ = reader.unlisted_files();
        let _ = reader.read_report::<mq_common::ClassificationReport>();
    }
});
