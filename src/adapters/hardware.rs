//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the DHT11 driver and exposes it, together with ADC1, through
//! [`ClimateSensor`] and [`AnalogInput`].  Analog reads are calibrated to
//! millivolts and reported as 5 V / 10-bit counts.  On non-espidf targets
//! the ADC read falls through to the injectable simulation in
//! [`hw_init`](crate::drivers::hw_init).
//!
//! The DHT11 returns temperature and humidity in one frame and must not be
//! polled more than once per two seconds, so `read_temperature` runs the
//! bus transaction and latches the result for the `read_humidity` call
//! that follows it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::app::ports::{AnalogInput, ClimateSensor};
use crate::drivers::dht11::{Dht11, Dht11Error, Dht11Sample};
use crate::drivers::hw_init;

/// Concrete adapter that combines the board's inputs behind port traits.
pub struct HardwareAdapter<P, D> {
    dht: Dht11<P, D>,
    /// Result of the transaction started by the last `read_temperature`.
    latched: Option<Result<Dht11Sample, Dht11Error>>,
}

impl<P, D> HardwareAdapter<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(dht: Dht11<P, D>) -> Self {
        Self { dht, latched: None }
    }

    fn transact(&mut self) -> Result<Dht11Sample, Dht11Error> {
        let result = self.dht.read();
        if let Err(e) = result {
            debug!("DHT11 read failed: {}", e);
        }
        result
    }
}

// ── ClimateSensor implementation ──────────────────────────────

impl<P, D> ClimateSensor for HardwareAdapter<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_temperature(&mut self) -> f32 {
        let result = self.transact();
        self.latched = Some(result);
        result.map_or(f32::NAN, |s| s.temperature_c)
    }

    fn read_humidity(&mut self) -> f32 {
        // Without a preceding temperature read, run a transaction of our own.
        let result = match self.latched.take() {
            Some(result) => result,
            None => self.transact(),
        };
        result.map_or(f32::NAN, |s| s.humidity_pct)
    }
}

// ── AnalogInput implementation ────────────────────────────────

impl<P, D> AnalogInput for HardwareAdapter<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn analog_read(&mut self, channel: u32) -> u16 {
        hw_init::adc1_read_tds_counts(channel)
    }
}
