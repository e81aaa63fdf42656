//! Sensor-side domain logic that sits behind the port traits.
//!
//! The raw drivers live in [`drivers`](crate::drivers); this layer only
//! turns what they report into domain values.

pub mod environment;

pub use environment::{read as read_environment, EnvironmentReading};
