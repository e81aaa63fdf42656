//! DHT11 temperature / humidity sensor driver (single-wire protocol).
//!
//! ```text
//!  host   ‾‾‾\________ 20 ms ________/‾‾‾ (release)
//!  sensor                                  \__80µs__/‾‾80µs‾‾\_50µs_/‾ 27µs (0) or 70µs (1) ‾\ ...
//! ```
//!
//! After the start pulse the sensor answers with an 80 µs low / 80 µs high
//! handshake, then clocks out 40 bits MSB first.  Every bit is a ~50 µs low
//! followed by a high whose length encodes the value; the driver compares
//! each high phase against the low phase just before it instead of using an
//! absolute threshold, so polling overhead cancels out.
//!
//! Generic over any `embedded-hal` 1.0 pin that is both input and output
//! (an open-drain GPIO with pull-up) and any `DelayNs`.  A pre-empted
//! transaction corrupts the frame, which the checksum then rejects.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

/// Host start pulse (datasheet minimum 18 ms).
pub const START_LOW_MS: u32 = 20;
/// Upper bound for any single phase of the waveform (µs of polling).
const PHASE_TIMEOUT_US: u32 = 100;
/// Data bits in one frame: humidity (2 B), temperature (2 B), checksum (1 B).
const FRAME_BITS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dht11Error {
    /// The sensor did not drive the expected edge in time (absent, wiring).
    Timeout,
    /// Sum of the four data bytes did not match the checksum byte.
    Checksum,
    /// The GPIO driver reported an error.
    Pin,
}

impl core::fmt::Display for Dht11Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Timeout => write!(f, "DHT11 response timeout"),
            Self::Checksum => write!(f, "DHT11 checksum mismatch"),
            Self::Pin => write!(f, "DHT11 GPIO error"),
        }
    }
}

/// One decoded frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dht11Sample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Take ownership of the data line and leave it released (idle high).
    pub fn new(mut pin: P, delay: D) -> Self {
        if pin.set_high().is_err() {
            // The first read() reports the fault as Dht11Error::Pin.
            warn!("DHT11: failed to release the data line");
        }
        Self { pin, delay }
    }

    /// Run one full transaction and decode it.
    pub fn read(&mut self) -> Result<Dht11Sample, Dht11Error> {
        let frame = self.read_frame()?;
        decode_frame(frame)
    }

    /// Run one transaction and return the raw 5-byte frame (unchecked).
    pub fn read_frame(&mut self) -> Result<[u8; 5], Dht11Error> {
        self.pin.set_low().map_err(|_| Dht11Error::Pin)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| Dht11Error::Pin)?;

        // Handshake: pull-up until the sensor answers, then 80 µs low, 80 µs high.
        self.wait_while(true)?;
        self.wait_while(false)?;
        self.wait_while(true)?;

        let mut frame = [0u8; 5];
        for bit in 0..FRAME_BITS {
            let low_us = self.wait_while(false)?;
            let high_us = self.wait_while(true)?;
            if high_us > low_us {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Give the pin and delay back.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Poll while the line sits at `high`; returns the µs spent there.
    fn wait_while(&mut self, high: bool) -> Result<u32, Dht11Error> {
        let mut elapsed = 0;
        while self.pin.is_high().map_err(|_| Dht11Error::Pin)? == high {
            if elapsed >= PHASE_TIMEOUT_US {
                return Err(Dht11Error::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }
}

/// Validate the checksum and decode a raw frame.
///
/// Humidity is `b0.b1`.  Temperature is `b2.(b3 & 0x0F)`; bit 7 of `b3`
/// marks a sub-zero reading, encoded as `-1 - b2` plus the tenths.
pub fn decode_frame(frame: [u8; 5]) -> Result<Dht11Sample, Dht11Error> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(Dht11Error::Checksum);
    }

    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) * 0.1;

    let mut temperature_c = f32::from(frame[2]);
    if frame[3] & 0x80 != 0 {
        temperature_c = -1.0 - temperature_c;
    }
    temperature_c += f32::from(frame[3] & 0x0F) * 0.1;

    Ok(Dht11Sample {
        temperature_c,
        humidity_pct,
    })
}
