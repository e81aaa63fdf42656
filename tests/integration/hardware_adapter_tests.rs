//! Integration tests for the HardwareAdapter → MonitorService path.
//!
//! A simulated DHT11 line replays a real frame waveform on a shared
//! microsecond timeline, and the ADC value is injected through the host
//! simulation in `hw_init`.  Nothing but the LCD is mocked.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use tdsmon::adapters::hardware::HardwareAdapter;
use tdsmon::app::ports::ClimateSensor;
use tdsmon::app::service::{CycleOutcome, MonitorService};
use tdsmon::config::MonitorConfig;
use tdsmon::drivers::dht11::Dht11;
use tdsmon::drivers::hw_init;

use crate::mock_hw::{MockDisplay, NoDelay, RecordingSink};

// ── Simulated DHT11 ──────────────────────────────────────────

struct SimDhtLine {
    now_us: Rc<Cell<u64>>,
    driven_low: bool,
    released_at: Option<u64>,
    waveform: Vec<(bool, u64)>,
}

impl ErrorType for SimDhtLine {
    type Error = Infallible;
}

impl OutputPin for SimDhtLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.driven_low = true;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if self.driven_low {
            self.released_at = Some(self.now_us.get());
        }
        self.driven_low = false;
        Ok(())
    }
}

impl InputPin for SimDhtLine {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        if self.driven_low {
            return Ok(false);
        }
        let Some(start) = self.released_at else {
            return Ok(true);
        };
        let mut offset = self.now_us.get() - start;
        for &(level, duration) in &self.waveform {
            if offset < duration {
                return Ok(level);
            }
            offset -= duration;
        }
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|h| !h)
    }
}

struct SimDelay(Rc<Cell<u64>>);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns).div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.set(self.0.get() + u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.set(self.0.get() + u64::from(ms) * 1000);
    }
}

/// Sensor response for `frame`: handshake, then 40 bits MSB first.
fn waveform_for(frame: [u8; 5]) -> Vec<(bool, u64)> {
    let mut w = vec![(true, 30), (false, 80), (true, 80)];
    for byte in frame {
        for i in (0..8).rev() {
            let one = (byte >> i) & 1 == 1;
            w.push((false, 50));
            w.push((true, if one { 70 } else { 27 }));
        }
    }
    w.push((false, 50));
    w
}

fn frame(humidity: u8, temperature: u8, tenths: u8) -> [u8; 5] {
    let sum = humidity.wrapping_add(temperature).wrapping_add(tenths);
    [humidity, 0, temperature, tenths, sum]
}

fn board(waveform: Vec<(bool, u64)>) -> HardwareAdapter<SimDhtLine, SimDelay> {
    let now = Rc::new(Cell::new(0));
    let line = SimDhtLine {
        now_us: now.clone(),
        driven_low: false,
        released_at: None,
        waveform,
    };
    HardwareAdapter::new(Dht11::new(line, SimDelay(now)))
}

// ── Tests ────────────────────────────────────────────────────

#[test]
fn climate_values_come_from_one_frame() {
    let mut hw = board(waveform_for(frame(48, 22, 5)));

    let t = hw.read_temperature();
    let h = hw.read_humidity();

    assert!((t - 22.5).abs() < 1e-5, "t = {}", t);
    assert_eq!(h, 48.0);
}

#[test]
fn full_cycle_through_real_adapter() {
    let config = MonitorConfig::default();
    // 2.5 V at the pin reads as 512 on the 5 V / 1024 scale.
    hw_init::sim_set_adc1_mv(config.tds_adc_channel, 2500);

    let mut app = MonitorService::<1>::new(config);
    let mut hw = board(waveform_for(frame(40, 25, 0)));
    let mut display = MockDisplay::new();
    let mut sink = RecordingSink::new();
    app.start(&mut display, &mut NoDelay::default(), &mut sink);

    let outcome = app.cycle(&mut hw, &mut display, &mut sink);

    let CycleOutcome::Measured(r) = outcome else {
        panic!("expected a measurement, got {:?}", outcome);
    };
    assert_eq!(r.median_raw, 512);
    assert!((r.ppm() - 1314.518_75).abs() < 0.01, "ppm = {}", r.ppm());
    assert_eq!(display.row(0), "T:25.0C H:40%");
    assert_eq!(display.row(1), "TDS:1315ppm");
}

#[test]
fn silent_sensor_becomes_a_fault_cycle() {
    let mut app = MonitorService::<1>::new(MonitorConfig::default());
    let mut hw = board(Vec::new());
    let mut display = MockDisplay::new();
    let mut sink = RecordingSink::new();
    app.start(&mut display, &mut NoDelay::default(), &mut sink);

    let outcome = app.cycle(&mut hw, &mut display, &mut sink);

    assert!(matches!(outcome, CycleOutcome::SensorFault(_)));
    assert_eq!(display.row(0), "DHT11 Error");
    assert_eq!(sink.faults(), 1);
}
