//! Unified error types for the TdsMon firmware.
//!
//! A single `Error` enum for the failures that stop the firmware at boot.
//! Sensor failures are not among them: [`SensorError`] is handled inside
//! the cycle and travels, `Copy`, inside
//! [`MonitorEvent`](crate::app::events::MonitorEvent).

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Boot-time failures, surfaced through `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration failed validation.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// The one domain error: temperature and/or humidity came back as NaN.
///
/// NaN is the sensor collaborator's only failure signal, so the flags
/// record which half of the reading was bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    InvalidEnvironmentReading {
        temperature_nan: bool,
        humidity_nan: bool,
    },
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnvironmentReading {
                temperature_nan,
                humidity_nan,
            } => match (temperature_nan, humidity_nan) {
                (true, true) => write!(f, "temperature and humidity not a number"),
                (true, false) => write!(f, "temperature not a number"),
                (false, _) => write!(f, "humidity not a number"),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.  Names the field and the rule.
    ValidationFailed(&'static str),
    /// JSON could not be parsed into a config.
    Malformed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::Malformed => write!(f, "malformed config"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}
