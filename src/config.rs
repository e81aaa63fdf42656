//! System configuration parameters
//!
//! Operating parameters for the TdsMon firmware.  The defaults are the
//! reference hardware values; `main` validates whatever it boots with.
//! The calibration constants of the TDS curve live in
//! [`sampling::tds`](crate::sampling::tds), not here.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;

/// DHT11 minimum safe polling interval (ms).  Polling faster returns stale
/// or corrupt frames.
pub const DHT11_MIN_POLL_MS: u32 = 2000;

/// Characters per LCD row.
pub const LCD_COLS: usize = 16;

/// Text for one LCD row.
pub type LcdLine = String<LCD_COLS>;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Timing ---
    /// Period of one sampling cycle (milliseconds).  Never below
    /// [`DHT11_MIN_POLL_MS`].
    pub poll_interval_ms: u32,
    /// How long the startup banner stays on screen (milliseconds).
    pub banner_hold_ms: u32,

    // --- Display ---
    /// Banner row 0.
    pub banner_title: LcdLine,
    /// Banner row 1.
    pub banner_subtitle: LcdLine,

    // --- Analog ---
    /// ADC1 channel the TDS probe is wired to.
    pub tds_adc_channel: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DHT11_MIN_POLL_MS, // 0.5 Hz
            banner_hold_ms: 2000,
            banner_title: lcd_line("Water Monitor"),
            banner_subtitle: lcd_line("DHT11 + TDS"),
            tds_adc_channel: pins::TDS_ADC_CHANNEL,
        }
    }
}

impl MonitorConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms < DHT11_MIN_POLL_MS {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms below DHT11 minimum (2000)",
            ));
        }
        if self.banner_hold_ms == 0 {
            return Err(ConfigError::ValidationFailed("banner_hold_ms must be non-zero"));
        }
        if self.tds_adc_channel > pins::ADC1_MAX_CHANNEL {
            return Err(ConfigError::ValidationFailed("tds_adc_channel is not an ADC1 channel"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// The boot config: `override_json` if given, the defaults otherwise.
    /// Either way the result has passed [`validate`](Self::validate).
    pub fn load(override_json: Option<&str>) -> Result<Self, ConfigError> {
        match override_json {
            Some(json) => Self::from_json(json),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }
}

/// Build an LCD line, dropping anything past column 16.
pub fn lcd_line(text: &str) -> LcdLine {
    let mut line = LcdLine::new();
    for ch in text.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
    line
}
