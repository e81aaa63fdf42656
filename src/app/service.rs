//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the sample window and the monitor state
//! machine.  All I/O flows through port traits injected at call sites, so
//! the whole service runs on the host against mock adapters.
//!
//! ```text
//!  ClimateSensor ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                    │        MonitorService         │
//!   AnalogInput ──▶  │  ring · median · TDS convert  │ ──▶ CharDisplay
//!                    └──────────────────────────────┘
//! ```
//!
//! ```text
//!  STARTUP ──[banner shown]──▶ SAMPLING ──[NaN reading]──▶ DISPLAY_ERROR
//!                                 ▲                            │
//!                                 └──────[next cycle]──────────┘
//! ```
//!
//! The service never sleeps between cycles; the caller paces it with a
//! [`CycleScheduler`](crate::scheduler::CycleScheduler).

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::MonitorConfig;
use crate::error::SensorError;
use crate::sampling::{SAMPLE_COUNT, SampleRing, convert, median};
use crate::sensors::read_environment;

use super::events::{MonitorEvent, ReadingData};
use super::layout;
use super::ports::{AnalogInput, CharDisplay, ClimateSensor, EventSink};

// ───────────────────────────────────────────────────────────────
// State
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Before [`MonitorService::start`] has shown the banner.
    Startup,
    /// Steady state: one measurement per cycle.
    Sampling,
    /// The last cycle's environment read failed.  Lasts one cycle.
    DisplayError,
}

/// What a single [`MonitorService::cycle`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    Measured(ReadingData),
    SensorFault(SensorError),
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// Orchestrates one sampling/display cycle at a time.
pub struct MonitorService<const N: usize = SAMPLE_COUNT> {
    config: MonitorConfig,
    state: MonitorState,
    samples: SampleRing<N>,
    cycle_count: u64,
    fault_count: u64,
    last_reading: Option<ReadingData>,
}

impl<const N: usize> MonitorService<N> {
    /// Construct the service with an all-zero sample window.
    ///
    /// Does **not** touch the display; call [`start`](Self::start) next.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            state: MonitorState::Startup,
            samples: SampleRing::new(),
            cycle_count: 0,
            fault_count: 0,
            last_reading: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the startup banner, hold it, clear, and enter `Sampling`.
    pub fn start(
        &mut self,
        display: &mut impl CharDisplay,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        if self.state != MonitorState::Startup {
            warn!("start() called in {:?}; ignored", self.state);
            return;
        }

        display.clear();
        display.set_cursor(0, 0);
        display.print(&self.config.banner_title);
        display.set_cursor(0, 1);
        display.print(&self.config.banner_subtitle);
        delay.delay_ms(self.config.banner_hold_ms);
        display.clear();

        sink.emit(&MonitorEvent::Started);
        self.transition(MonitorState::Sampling, sink);
        info!("MonitorService started, window={} samples", N);
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cycle: environment → sample → median → convert → outputs.
    ///
    /// On an invalid environment reading nothing is sampled or converted;
    /// the error is logged and displayed and the next call starts over in
    /// `Sampling`.  The `hw` parameter satisfies both input ports, which
    /// keeps one mutable borrow for the whole board.
    pub fn cycle(
        &mut self,
        hw: &mut (impl ClimateSensor + AnalogInput),
        display: &mut impl CharDisplay,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        self.cycle_count += 1;

        match self.state {
            MonitorState::Sampling => {}
            MonitorState::DisplayError => self.transition(MonitorState::Sampling, sink),
            MonitorState::Startup => {
                warn!("cycle() before start(); banner skipped");
                self.transition(MonitorState::Sampling, sink);
            }
        }

        let env = match read_environment(hw) {
            Ok(env) => env,
            Err(e) => {
                self.fault_count += 1;
                self.transition(MonitorState::DisplayError, sink);
                sink.emit(&MonitorEvent::SensorFault(e));
                display.clear();
                display.print(layout::ERROR_TEXT);
                return CycleOutcome::SensorFault(e);
            }
        };

        // Push and filter back-to-back: the median always sees the window
        // exactly as it stands after this cycle's sample.
        let raw = hw.analog_read(self.config.tds_adc_channel);
        self.samples.push(raw);
        let median_raw = median(self.samples.snapshot());
        let tds = convert(median_raw, env.temperature_c);

        let reading = ReadingData {
            cycle: self.cycle_count,
            temperature_c: env.temperature_c,
            humidity_pct: env.humidity_pct,
            median_raw,
            tds,
            buffer_primed: self.samples.is_primed(),
        };

        sink.emit(&MonitorEvent::Reading(reading));
        self.render_reading(display, &reading);
        self.last_reading = Some(reading);

        CycleOutcome::Measured(reading)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Cycles run since startup, faulted ones included.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Cycles skipped because of an invalid environment reading.
    pub fn fault_count(&self) -> u64 {
        self.fault_count
    }

    /// The most recent successful reading, if any.
    pub fn last_reading(&self) -> Option<&ReadingData> {
        self.last_reading.as_ref()
    }

    /// The sample window (read-only).
    pub fn samples(&self) -> &SampleRing<N> {
        &self.samples
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn render_reading(&self, display: &mut impl CharDisplay, reading: &ReadingData) {
        display.clear();
        display.set_cursor(0, 0);
        display.print(&layout::climate_row(reading.temperature_c, reading.humidity_pct));
        display.set_cursor(0, 1);
        display.print(&layout::tds_row(reading.ppm()));
    }

    fn transition(&mut self, to: MonitorState, sink: &mut impl EventSink) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        sink.emit(&MonitorEvent::StateChanged { from, to });
    }
}
