#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Detection and conversion of arbitrary bytes must never panic;
    // anything short of a well-formed stream returns CorruptInput.
    let _ = uncrush::is_apple_png(data);
    let _ = uncrush::normalize(data);
});
