//! HD44780 16x2 character LCD behind a PCF8574 I²C backpack.
//!
//! The backpack maps its eight port bits onto the LCD bus:
//!
//! ```text
//!  P7 P6 P5 P4 │ P3 │ P2 │ P1 │ P0
//!  D7 D6 D5 D4 │ BL │ EN │ RW │ RS
//! ```
//!
//! so every byte is sent as two 4-bit nibbles, each latched by pulsing EN.
//! RW is tied to write.  Generic over any `embedded-hal` 1.0 `I2c` bus and
//! `DelayNs`.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

pub const COLS: u8 = 16;
pub const ROWS: u8 = 2;

// Backpack control bits.
const RS: u8 = 0b0000_0001;
const EN: u8 = 0b0000_0100;
const BACKLIGHT: u8 = 0b0000_1000;

// HD44780 instructions.
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of column 0 on each row.
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

pub struct Lcd1602<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<I, D> Lcd1602<I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Wrap the bus.  Nothing is sent until [`init`](Self::init).
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: true,
        }
    }

    /// Power-on initialisation into 4-bit, two-line mode; leaves the
    /// display on, cleared, cursor hidden.
    pub fn init(&mut self) -> Result<(), I::Error> {
        // Controller needs >40 ms after Vcc reaches 2.7 V.
        self.delay.delay_ms(50);

        // Force 8-bit mode three times, then switch to 4-bit (datasheet fig. 24).
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02, false)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_INCREMENT)
    }

    /// Blank the screen and return the cursor home.
    pub fn clear(&mut self) -> Result<(), I::Error> {
        self.command(CMD_CLEAR)?;
        // Clear is the one slow instruction (1.52 ms).
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor.  Out-of-range positions are clamped to the last
    /// row / column.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I::Error> {
        let row = row.min(ROWS - 1);
        let col = col.min(COLS - 1);
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    /// Write text at the cursor.  Characters outside printable ASCII are
    /// shown as `?` (the HD44780 ROM only matches ASCII in that range).
    pub fn write_str(&mut self, text: &str) -> Result<(), I::Error> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                b'?'
            };
            self.send(byte, true)?;
        }
        Ok(())
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), I::Error> {
        self.backlight = on;
        let bits = self.backlight_bits();
        self.i2c.write(self.address, &[bits])
    }

    /// Give the bus and delay back.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    // ── Internal ──────────────────────────────────────────────

    fn command(&mut self, cmd: u8) -> Result<(), I::Error> {
        self.send(cmd, false)
    }

    fn send(&mut self, byte: u8, data: bool) -> Result<(), I::Error> {
        self.write_nibble(byte >> 4, data)?;
        self.write_nibble(byte & 0x0F, data)
    }

    fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<(), I::Error> {
        let mut bits = (nibble << 4) | self.backlight_bits();
        if data {
            bits |= RS;
        }
        self.i2c.write(self.address, &[bits | EN])?;
        self.delay.delay_us(1);
        self.i2c.write(self.address, &[bits & !EN])?;
        // Most instructions settle within 37 µs.
        self.delay.delay_us(50);
        Ok(())
    }

    fn backlight_bits(&self) -> u8 {
        if self.backlight { BACKLIGHT } else { 0 }
    }
}
