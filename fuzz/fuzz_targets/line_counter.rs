#![no_main]

use loganizer::decompression::count_lines;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = std::io::BufReader::new(data);
    let counted = count_lines(&mut reader).unwrap_or(0);
    let newlines = data.iter().filter(|b| **b == b'\n').count();
    // A trailing partial line counts as one entry
    assert!(counted == newlines || counted == newlines + 1);
});
