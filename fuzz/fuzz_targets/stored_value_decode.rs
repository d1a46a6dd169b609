//! Decoding arbitrary stored bytes must fail cleanly, never panic, and a
//! successful decode must re-encode.

#![no_main]

use launchgate_core::StoredValue;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = StoredValue::decode("fuzz", data) {
        let encoded = value.encode("fuzz").expect("decoded value re-encodes");
        // Marks may carry NaN floats, so compare shape rather than value.
        let again = StoredValue::decode("fuzz", &encoded).expect("re-encoded value decodes");
        assert_eq!(std::mem::discriminant(&value), std::mem::discriminant(&again));
    }
});
