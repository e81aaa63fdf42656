//! Text layout for the LCD and the serial log.
//!
//! ```text
//!  ┌────────────────┐
//!  │T:23.4C H:41%   │  row 0
//!  │TDS:1315ppm     │  row 1
//!  └────────────────┘
//! ```
//!
//! Everything is formatted into fixed-capacity `heapless` strings; text
//! that does not fit is clipped rather than wrapped onto the next row.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::LcdLine;

use super::events::ReadingData;

/// Shown on both outputs when the DHT11 returns NaN.
pub const ERROR_TEXT: &str = "DHT11 Error";

/// Capacity of one serial log line.
pub const LOG_LINE_CAP: usize = 96;

pub type LogLine = String<LOG_LINE_CAP>;

/// `fmt::Write` into a heapless string that drops overflow instead of failing.
struct Clip<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Clip<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

fn clipped<const N: usize>(args: fmt::Arguments<'_>) -> String<N> {
    let mut out = String::new();
    // Clip never reports an error; overflow is dropped.
    let _ = Clip(&mut out).write_fmt(args);
    out
}

/// Round to `places` decimals with ties away from zero, ahead of `{:.N}`
/// formatting (which would round ties to even).
fn rounded(x: f32, places: i32) -> f32 {
    let scale = 10f32.powi(places);
    let scaled = x * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        x
    }
}

/// Row 0: `T:<temp, 1 dp>C H:<humidity, 0 dp>%`.
pub fn climate_row(temperature_c: f32, humidity_pct: f32) -> LcdLine {
    clipped(format_args!(
        "T:{:.1}C H:{:.0}%",
        rounded(temperature_c, 1),
        rounded(humidity_pct, 0)
    ))
}

/// Row 1: `TDS:<ppm, 0 dp>ppm`.
pub fn tds_row(ppm: f32) -> LcdLine {
    clipped(format_args!("TDS:{:.0}ppm", rounded(ppm, 0)))
}

/// Serial line for a successful cycle, two decimals per value.
pub fn log_line(reading: &ReadingData) -> LogLine {
    clipped(format_args!(
        "Temp: {:.2} C | Hum: {:.2} % | TDS: {:.2} ppm",
        rounded(reading.temperature_c, 2),
        rounded(reading.humidity_pct, 2),
        rounded(reading.ppm(), 2)
    ))
}
