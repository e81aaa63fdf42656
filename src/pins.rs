//! GPIO / peripheral assignments for the TdsMon board (ESP32-S3).
//!
//! Single source of truth — drivers and `main` reference this module
//! rather than hard-coding numbers.

// ---------------------------------------------------------------------------
// DHT11 temperature / humidity sensor
// ---------------------------------------------------------------------------

/// Single-wire data line, open-drain with a 10 kΩ pull-up to 3V3.
pub const DHT11_DATA_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// TDS probe: analog (ADC1)
// ---------------------------------------------------------------------------

/// Analog TDS probe board output.  GPIO 5 = ADC1 channel 4 on the S3.
pub const TDS_ADC_GPIO: i32 = 5;
/// ADC1 channel for [`TDS_ADC_GPIO`].
pub const TDS_ADC_CHANNEL: u32 = 4;
/// Highest valid ADC1 channel index on the ESP32-S3.
pub const ADC1_MAX_CHANNEL: u32 = 9;

// ---------------------------------------------------------------------------
// I²C bus: 16x2 character LCD behind a PCF8574 backpack
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;
/// Standard-mode I²C.  The PCF8574 tops out at 100 kHz.
pub const I2C_FREQ_HZ: u32 = 100_000;
/// 7-bit address of the backpack (A0–A2 pulled high).
pub const LCD_I2C_ADDR: u8 = 0x27;
