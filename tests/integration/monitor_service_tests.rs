//! Integration tests for the MonitorService → ring → median → TDS pipeline.
//!
//! These run on the host (x86_64) and drive whole cycles through mock
//! adapters, asserting on what reaches the display and the event sink.

use std::cell::Cell;

use tdsmon::app::events::MonitorEvent;
use tdsmon::app::layout::ERROR_TEXT;
use tdsmon::app::ports::Clock;
use tdsmon::app::service::{CycleOutcome, MonitorService, MonitorState};
use tdsmon::config::MonitorConfig;
use tdsmon::error::SensorError;
use tdsmon::sampling::SAMPLE_COUNT;
use tdsmon::scheduler::CycleScheduler;

use crate::mock_hw::{DisplayCall, MockBoard, MockDisplay, NoDelay, RecordingSink};

fn make_app() -> (MonitorService, MockDisplay, RecordingSink) {
    let mut app: MonitorService = MonitorService::new(MonitorConfig::default());
    let mut display = MockDisplay::new();
    let mut sink = RecordingSink::new();
    app.start(&mut display, &mut NoDelay::default(), &mut sink);
    (app, display, sink)
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn start_shows_banner_then_clears() {
    let mut app: MonitorService = MonitorService::new(MonitorConfig::default());
    let mut display = MockDisplay::new();
    let mut sink = RecordingSink::new();
    let mut delay = NoDelay::default();

    app.start(&mut display, &mut delay, &mut sink);

    assert_eq!(display.printed(), ["Water Monitor", "DHT11 + TDS"]);
    assert_eq!(display.calls.last(), Some(&DisplayCall::Clear));
    // Banner held for 2 s.
    assert_eq!(delay.total_ns, 2_000_000_000);
    assert_eq!(app.state(), MonitorState::Sampling);
    assert!(matches!(sink.events[0], MonitorEvent::Started));
    assert!(matches!(
        sink.events[1],
        MonitorEvent::StateChanged {
            from: MonitorState::Startup,
            to: MonitorState::Sampling
        }
    ));
}

#[test]
fn second_start_is_ignored() {
    let (mut app, mut display, mut sink) = make_app();
    let before = (display.calls.len(), sink.events.len());

    app.start(&mut display, &mut NoDelay::default(), &mut sink);

    assert_eq!((display.calls.len(), sink.events.len()), before);
}

// ── Steady-state cycles ──────────────────────────────────────

#[test]
fn full_window_of_512_at_25c_reads_1315_ppm() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::new(25.0, 40.0, 512);

    let mut last = None;
    for _ in 0..SAMPLE_COUNT {
        last = Some(app.cycle(&mut board, &mut display, &mut sink));
    }

    let Some(CycleOutcome::Measured(r)) = last else {
        panic!("expected a measurement, got {:?}", last);
    };
    assert_eq!(r.median_raw, 512);
    assert!(r.buffer_primed);
    assert_eq!(r.tds.average_voltage, 2.5);
    assert_eq!(r.tds.compensation_coefficient, 1.0);
    assert_eq!(r.tds.compensation_voltage, 2.5);
    assert!((r.ppm() - 1314.518_75).abs() < 0.01, "ppm = {}", r.ppm());

    assert_eq!(display.row(0), "T:25.0C H:40%");
    assert_eq!(display.row(1), "TDS:1315ppm");
    assert_eq!(sink.readings(), SAMPLE_COUNT);
}

#[test]
fn pre_fill_zeros_hold_the_median_down_until_half_full() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::new(25.0, 40.0, 512);

    // Window of 30: the upper median (index 15) stays 0 while more than
    // 15 slots are still zero.
    for cycle in 1..=SAMPLE_COUNT {
        let CycleOutcome::Measured(r) = app.cycle(&mut board, &mut display, &mut sink) else {
            panic!("cycle {} faulted", cycle);
        };
        let expected = if cycle >= SAMPLE_COUNT / 2 { 512 } else { 0 };
        assert_eq!(r.median_raw, expected, "cycle {}", cycle);
        assert_eq!(r.buffer_primed, cycle == SAMPLE_COUNT);
    }
}

#[test]
fn reads_temperature_then_humidity_then_analog() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::new(21.0, 55.0, 300);

    app.cycle(&mut board, &mut display, &mut sink);

    assert_eq!(board.call_order, ['T', 'H', 'A']);
    assert_eq!(board.analog_reads, [app.config().tds_adc_channel]);
}

#[test]
fn last_reading_tracks_the_latest_success() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::scripted(&[(20.0, 50.0), (f32::NAN, 50.0)], 400);

    app.cycle(&mut board, &mut display, &mut sink);
    app.cycle(&mut board, &mut display, &mut sink);

    let last = app.last_reading().copied();
    assert_eq!(last.map(|r| r.cycle), Some(1));
    assert_eq!(last.map(|r| r.temperature_c), Some(20.0));
}

// ── Invalid environment readings ─────────────────────────────

#[test]
fn nan_reading_skips_sampling_and_conversion() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::new(f32::NAN, 40.0, 512);

    let outcome = app.cycle(&mut board, &mut display, &mut sink);

    assert_eq!(
        outcome,
        CycleOutcome::SensorFault(SensorError::InvalidEnvironmentReading {
            temperature_nan: true,
            humidity_nan: false,
        })
    );
    // No ADC read, no push, no reading event.
    assert!(board.analog_reads.is_empty());
    assert_eq!(app.samples().filled(), 0);
    assert_eq!(sink.readings(), 0);
    assert_eq!(sink.faults(), 1);
    assert!(app.last_reading().is_none());
}

#[test]
fn nan_humidity_alone_is_a_fault() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::new(22.0, f32::NAN, 512);

    let outcome = app.cycle(&mut board, &mut display, &mut sink);

    assert!(matches!(
        outcome,
        CycleOutcome::SensorFault(SensorError::InvalidEnvironmentReading {
            temperature_nan: false,
            humidity_nan: true,
        })
    ));
    assert!(board.analog_reads.is_empty());
}

#[test]
fn fault_shows_error_text_alone() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::new(f32::NAN, f32::NAN, 512);
    display.calls.clear();

    app.cycle(&mut board, &mut display, &mut sink);

    assert_eq!(
        display.calls,
        [DisplayCall::Clear, DisplayCall::Print(ERROR_TEXT.to_string())]
    );
    assert_eq!(display.row(0), "DHT11 Error");
    assert_eq!(display.row(1), "");
}

#[test]
fn fault_enters_display_error_and_recovers_next_cycle() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::scripted(&[(f32::NAN, 40.0), (24.0, 40.0)], 512);
    sink.events.clear();

    app.cycle(&mut board, &mut display, &mut sink);
    assert_eq!(app.state(), MonitorState::DisplayError);

    app.cycle(&mut board, &mut display, &mut sink);
    assert_eq!(app.state(), MonitorState::Sampling);
    assert_eq!(app.samples().filled(), 1);
    assert_eq!(app.cycle_count(), 2);
    assert_eq!(app.fault_count(), 1);

    let transitions: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            MonitorEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        [
            (MonitorState::Sampling, MonitorState::DisplayError),
            (MonitorState::DisplayError, MonitorState::Sampling),
        ]
    );
}

#[test]
fn faulted_cycles_leave_the_window_untouched() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::new(25.0, 40.0, 700);

    app.cycle(&mut board, &mut display, &mut sink);
    let before = *app.samples().snapshot();

    board.set_climate(f32::NAN, f32::NAN);
    for _ in 0..5 {
        app.cycle(&mut board, &mut display, &mut sink);
    }

    assert_eq!(app.samples().snapshot(), &before);
    assert_eq!(app.samples().cursor(), 1);
}

// ── Pacing ───────────────────────────────────────────────────

/// Clock and delay sharing one simulated timeline.
struct SimTime {
    now: Cell<u64>,
}

impl Clock for SimTime {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

struct SimDelay<'a>(&'a SimTime);

impl embedded_hal::delay::DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.now.set(self.0.now.get() + u64::from(ns) / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.now.set(self.0.now.get() + u64::from(ms));
    }
}

#[test]
fn faulted_cycle_still_waits_one_interval() {
    let (mut app, mut display, mut sink) = make_app();
    let mut board = MockBoard::scripted(&[(f32::NAN, 40.0), (25.0, 40.0)], 512);
    let time = SimTime { now: Cell::new(0) };
    let mut sched = CycleScheduler::new(app.config().poll_interval_ms, 0);
    let mut starts = Vec::new();

    for _ in 0..3 {
        starts.push(time.now_ms());
        app.cycle(&mut board, &mut display, &mut sink);
        sched.wait_next(&time, &mut SimDelay(&time));
    }

    assert_eq!(starts, [0, 2000, 4000]);
    assert_eq!(sink.faults(), 1);
    assert_eq!(sink.readings(), 2);
}
