//! Environment reader — validates one temperature/humidity reading.
//!
//! The sensor collaborator signals failure only by returning NaN, so this
//! is the boundary where that convention becomes a typed
//! [`SensorError`].  No retry happens here; the monitor loop simply tries
//! again next cycle.

use crate::app::ports::ClimateSensor;
use crate::error::SensorError;

/// A validated reading.  Both fields are guaranteed not to be NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentReading {
    /// Ambient temperature (°C).
    pub temperature_c: f32,
    /// Relative humidity (%).
    pub humidity_pct: f32,
}

/// Read temperature, then humidity, and reject the pair if either is NaN.
pub fn read(sensor: &mut impl ClimateSensor) -> Result<EnvironmentReading, SensorError> {
    let temperature_c = sensor.read_temperature();
    let humidity_pct = sensor.read_humidity();

    let temperature_nan = temperature_c.is_nan();
    let humidity_nan = humidity_pct.is_nan();
    if temperature_nan || humidity_nan {
        return Err(SensorError::InvalidEnvironmentReading {
            temperature_nan,
            humidity_nan,
        });
    }

    Ok(EnvironmentReading {
        temperature_c,
        humidity_pct,
    })
}
