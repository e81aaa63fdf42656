//! TdsMon Firmware — Main Entry Point
//!
//! Hexagonal architecture, one blocking task, fixed two-second cadence.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        Lcd1602         LogEventSink  Esp32Time│
//! │  (ClimateSensor +       (CharDisplay)   (EventSink)   (Clock)  │
//! │   AnalogInput)                                                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           MonitorService (pure logic)                  │    │
//! │  │  SampleRing · median · TDS convert · state machine     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  CycleScheduler (deadline-paced main loop)                     │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::{PinDriver, Pull};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use log::info;

use tdsmon::adapters::hardware::HardwareAdapter;
use tdsmon::adapters::log_sink::LogEventSink;
use tdsmon::adapters::time::Esp32TimeAdapter;
use tdsmon::app::ports::Clock;
use tdsmon::app::service::MonitorService;
use tdsmon::config::MonitorConfig;
use tdsmon::drivers::dht11::Dht11;
use tdsmon::drivers::hw_init;
use tdsmon::drivers::lcd1602::Lcd1602;
use tdsmon::error::Error;
use tdsmon::pins;
use tdsmon::scheduler::CycleScheduler;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  TdsMon v{}                          ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    // Bench builds may bake in an override: TDSMON_CONFIG='{...}' cargo build
    let config = MonitorConfig::load(option_env!("TDSMON_CONFIG")).map_err(Error::from)?;
    info!(
        "Config: {} ms cycle, TDS on ADC1 CH{}",
        config.poll_interval_ms, config.tds_adc_channel
    );

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_adc(config.tds_adc_channel).map_err(Error::from)?;

    let peripherals = Peripherals::take()?;

    // DHT11 data line: open-drain, idles high on the pull-up.
    let mut dht_pin = PinDriver::input_output_od(peripherals.pins.gpio4)?;
    dht_pin.set_pull(Pull::Up)?;
    let dht = Dht11::new(dht_pin, Ets);
    info!("DHT11 on GPIO{}", pins::DHT11_DATA_GPIO);

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8,
        peripherals.pins.gpio9,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;
    let mut lcd = Lcd1602::new(i2c, Ets, pins::LCD_I2C_ADDR);
    lcd.init()?;
    lcd.set_backlight(true)?;
    info!(
        "LCD1602 at 0x{:02X} (SDA=GPIO{}, SCL=GPIO{})",
        pins::LCD_I2C_ADDR,
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO
    );

    // ── 4. Adapters + service ─────────────────────────────────
    let mut hw = HardwareAdapter::new(dht);
    let mut log_sink = LogEventSink::new();
    let clock = Esp32TimeAdapter::new();

    let mut app: MonitorService = MonitorService::new(config);
    app.start(&mut lcd, &mut FreeRtos, &mut log_sink);

    // ── 5. Main loop ──────────────────────────────────────────
    let mut scheduler = CycleScheduler::new(app.config().poll_interval_ms, clock.now_ms());
    info!(
        "Entering main loop ({} ms cadence)",
        scheduler.interval_ms()
    );

    loop {
        app.cycle(&mut hw, &mut lcd, &mut log_sink);
        scheduler.wait_next(&clock, &mut FreeRtos);
    }
}
