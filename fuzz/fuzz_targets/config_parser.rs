#![no_main]

use loganizer::config_file::{parse_descriptors, validate_descriptors};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Rejections are fine; we only care about panics.
        if let Ok(descriptors) = parse_descriptors(input) {
            let _ = validate_descriptors(&descriptors);
        }
    }
});
