//! Fuzz target for config.toml parsing and validation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mq_core::config::Config;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Accepted configs must survive a TOML round trip.
        if let Ok(config) = Config::from_toml(text, Path::new("fuzz.toml")) {
            let again = Config::from_toml(&config.to_toml(), Path::new("fuzz.toml"));
            assert!(again.is_ok());
        }
    }
});
