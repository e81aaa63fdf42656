//! Analog sampling pipeline: ring buffer → median filter → TDS conversion.
//!
//! ```text
//!  analog_read ──▶ SampleRing::push ──▶ median(snapshot) ──▶ tds::convert ──▶ ppm
//! ```
//!
//! Everything here is pure and allocation-free; the only state is the
//! [`SampleRing`] owned by the monitor service.

pub mod median;
pub mod ring;
pub mod tds;

pub use median::median;
pub use ring::SampleRing;
pub use tds::{convert, TdsConversion};

/// Number of raw samples in the median window (SCOUNT).
pub const SAMPLE_COUNT: usize = 30;
