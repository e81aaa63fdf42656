//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing monitor events to the ESP-IDF
//! logger (UART / USB-CDC in production).  At info level and above a cycle
//! produces exactly one line: the reading line, or `DHT11 Error` at warn.
//! Fault detail, state transitions and a JSON record of each reading go
//! out at debug level.

use log::{debug, info, warn};

use crate::app::events::MonitorEvent;
use crate::app::layout::{self, ERROR_TEXT};
use crate::app::ports::EventSink;

/// Adapter that logs every [`MonitorEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Reading(r) => {
                info!("{}", layout::log_line(r));
                match serde_json::to_string(r) {
                    Ok(json) => debug!("READING | {}", json),
                    Err(e) => debug!("READING | json encode failed: {}", e),
                }
            }
            MonitorEvent::SensorFault(e) => {
                warn!("{}", ERROR_TEXT);
                debug!("FAULT | {}", e);
            }
            MonitorEvent::StateChanged { from, to } => {
                debug!("STATE | {:?} -> {:?}", from, to);
            }
            MonitorEvent::Started => {
                info!("START | monitor running");
            }
        }
    }
}
