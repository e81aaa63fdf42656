//! TDS water-monitor firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod sampling;
pub mod scheduler;
pub mod sensors;

// Hardware-facing layers; real peripherals only behind cfg guards inside.
pub mod adapters;
pub mod drivers;
