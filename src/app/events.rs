//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Today the only
//! consumer is the serial log; nothing here assumes that.

use serde::Serialize;

use crate::error::SensorError;
use crate::sampling::TdsConversion;

use super::service::MonitorState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// The service finished its startup sequence.
    Started,

    /// The monitor state machine moved between states.
    StateChanged { from: MonitorState, to: MonitorState },

    /// One successful measurement cycle.
    Reading(ReadingData),

    /// The environment sensor returned NaN; the cycle was skipped.
    SensorFault(SensorError),
}

/// Everything one successful cycle produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadingData {
    /// 1-based cycle number (counts faulted cycles too).
    pub cycle: u64,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// Median of the sample window, in raw ADC counts.
    pub median_raw: u16,
    pub tds: TdsConversion,
    /// `false` while the window still contains zero-initialised slots.
    pub buffer_primed: bool,
}

impl ReadingData {
    pub fn ppm(&self) -> f32 {
        self.tds.ppm
    }
}
