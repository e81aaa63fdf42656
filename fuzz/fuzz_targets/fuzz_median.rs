//! Fuzz target: `SampleRing` + `median`
//!
//! Pushes an arbitrary stream of samples through the 30-slot ring and
//! checks after every push that the median equals the sorted-copy oracle
//! and that the ring itself is left untouched by filtering.
//!
//! cargo fuzz run fuzz_median

#![no_main]

use libfuzzer_sys::fuzz_target;
use tdsmon::sampling::{SAMPLE_COUNT, SampleRing, median};

fuzz_target!(|data: &[u8]| {
    let mut ring = SampleRing::<SAMPLE_COUNT>::new();

    for pair in data.chunks_exact(2) {
        ring.push(u16::from_le_bytes([pair[0], pair[1]]));

        let before = *ring.snapshot();
        let m = median(ring.snapshot());
        assert_eq!(ring.snapshot(), &before, "median mutated the window");

        let mut sorted = before;
        sorted.sort_unstable();
        assert_eq!(m, sorted[SAMPLE_COUNT / 2]);
        assert!(ring.cursor() < SAMPLE_COUNT);
    }
});
