//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (DHT11, ADC, LCD, serial log, clock) implement these
//! traits.  The [`MonitorService`](super::service::MonitorService) consumes
//! them via generics, so the domain core never touches hardware directly.
//!
//! Delays are not a port of their own: anything that blocks takes an
//! [`embedded_hal::delay::DelayNs`], which every HAL already provides.

// ───────────────────────────────────────────────────────────────
// Climate sensor port (driven adapter: DHT11 → domain)
// ───────────────────────────────────────────────────────────────

/// Ambient temperature / humidity source.
///
/// NaN is the only failure signal.  Implementations may sample both
/// quantities in one bus transaction started by [`read_temperature`]; the
/// domain always calls `read_temperature` first, then `read_humidity`.
///
/// [`read_temperature`]: ClimateSensor::read_temperature
pub trait ClimateSensor {
    /// Temperature in °C, or NaN if the sensor could not be read.
    fn read_temperature(&mut self) -> f32;

    /// Relative humidity in %, or NaN if the sensor could not be read.
    fn read_humidity(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Analog input port (driven adapter: ADC → domain)
// ───────────────────────────────────────────────────────────────

/// One-shot analog conversion.
pub trait AnalogInput {
    /// Sample `channel` once.  Returns the count in `[0, 1023]` of a 5 V,
    /// 10-bit converter, whatever the underlying ADC.
    fn analog_read(&mut self, channel: u32) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Character display port (driven adapter: domain → LCD)
// ───────────────────────────────────────────────────────────────

/// Two-row character display.  Output is best-effort: adapters swallow
/// (and log) bus errors rather than failing the cycle.
pub trait CharDisplay {
    /// Blank the screen and home the cursor.
    fn clear(&mut self);

    /// Move the cursor to `col` (0-based) on `row` (0 or 1).
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write `text` at the cursor.
    fn print(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → serial log)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: system timer → scheduler)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
pub trait Clock {
    /// Milliseconds since boot.  Never decreases.
    fn now_ms(&self) -> u64;
}
