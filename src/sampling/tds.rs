//! Raw probe sample → temperature-compensated TDS (ppm).
//!
//! The cubic is the vendor calibration curve for the analog TDS probe
//! board (conductivity voltage → ppm at 25 °C).  Its coefficients are
//! fitted constants, not tunables.  Conductivity rises roughly 2 % per
//! degree, so the voltage is normalised back to 25 °C before the curve
//! is applied.
//!
//! No range checking: negative, huge, infinite or NaN results pass
//! straight through to the caller.

use serde::Serialize;

/// ADC reference voltage of the probe board (V).
pub const VREF: f32 = 5.0;
/// Full-scale count of the 10-bit converter.
pub const ADC_FULL_SCALE: f32 = 1024.0;
/// Temperature at which the calibration curve was fitted (°C).
pub const REFERENCE_TEMP_C: f32 = 25.0;
/// Fractional conductivity change per °C.
pub const COMPENSATION_SLOPE: f32 = 0.02;

const CUBIC: f32 = 133.42;
const QUADRATIC: f32 = 255.86;
const LINEAR: f32 = 857.39;
const SCALE: f32 = 0.5;

/// Every intermediate of one conversion, for logging and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TdsConversion {
    pub average_voltage: f32,
    pub compensation_coefficient: f32,
    pub compensation_voltage: f32,
    pub ppm: f32,
}

/// Convert a median-filtered raw sample at `temperature_c` into ppm.
pub fn convert(median_raw: u16, temperature_c: f32) -> TdsConversion {
    let average_voltage = f32::from(median_raw) * VREF / ADC_FULL_SCALE;
    let compensation_coefficient = 1.0 + COMPENSATION_SLOPE * (temperature_c - REFERENCE_TEMP_C);
    let compensation_voltage = average_voltage / compensation_coefficient;

    let v = compensation_voltage;
    let ppm = (CUBIC * v * v * v - QUADRATIC * v * v + LINEAR * v) * SCALE;

    TdsConversion {
        average_voltage,
        compensation_coefficient,
        compensation_voltage,
        ppm,
    }
}
