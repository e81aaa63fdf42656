//! LCD display adapter.
//!
//! Implements [`CharDisplay`] for the I²C [`Lcd1602`].  Bus errors are
//! logged and dropped: a glitched frame on the LCD is corrected by the
//! next cycle's redraw, so it never stops sampling.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::CharDisplay;
use crate::drivers::lcd1602::Lcd1602;

impl<I, D> CharDisplay for Lcd1602<I, D>
where
    I: I2c,
    D: DelayNs,
{
    fn clear(&mut self) {
        if let Err(e) = Lcd1602::clear(self) {
            warn!("LCD clear failed: {:?}", e);
        }
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        if let Err(e) = Lcd1602::set_cursor(self, col, row) {
            warn!("LCD set_cursor({}, {}) failed: {:?}", col, row, e);
        }
    }

    fn print(&mut self, text: &str) {
        if let Err(e) = self.write_str(text) {
            warn!("LCD write failed: {:?}", e);
        }
    }
}
