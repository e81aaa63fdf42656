//! Peripheral drivers and one-shot hardware initialisation.

pub mod dht11;
pub mod hw_init;
pub mod lcd1602;
