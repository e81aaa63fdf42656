//! Application core — pure domain logic, zero I/O.
//!
//! The monitor state machine and output layout live here.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod layout;
pub mod ports;
pub mod service;
