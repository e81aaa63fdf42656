//! Fuzz target: `dht11::decode_frame`
//!
//! Feeds arbitrary 5-byte frames to the decoder and asserts that it never
//! panics, accepts exactly the frames with a matching checksum, and never
//! yields NaN or out-of-encoding values.
//!
//! cargo fuzz run fuzz_dht11_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use tdsmon::drivers::dht11::{Dht11Error, decode_frame};

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = <[u8; 5]>::try_from(data.get(..5).unwrap_or(&[])) else {
        return;
    };

    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    match decode_frame(frame) {
        Ok(s) => {
            assert_eq!(sum, frame[4], "accepted a frame with a bad checksum");
            assert!(!s.humidity_pct.is_nan() && !s.temperature_c.is_nan());
            // b0 + b1/10 and ±(b2 + 1) + 1.5 bound everything encodable.
            assert!((0.0..=281.0).contains(&s.humidity_pct));
            assert!((-257.0..=257.0).contains(&s.temperature_c));
        }
        Err(Dht11Error::Checksum) => assert_ne!(sum, frame[4]),
        Err(e) => panic!("decode_frame returned a bus error: {}", e),
    }
});
