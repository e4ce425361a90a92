//! Startup sequence tests

mod common;

use std::cell::Cell;

use cat_collar_alert::config::SinkConfig;
use cat_collar_alert::error::{ConfigError, SinkError, StartupError};
use cat_collar_alert::fault::FaultState;
use cat_collar_alert::logging::{LogLevel, LogStream};
use cat_collar_alert::startup::{start, AlertSettings};
use cat_collar_alert::trigger::{Diagnostics, StepOutcome, TriggerState};
use common::{zero_clock, FakeDelay, RecordingSink, ScriptedPin, VirtualClock};

fn diag<'a>(log: &'a LogStream, fault: &'a FaultState) -> Diagnostics<'a> {
    Diagnostics {
        log,
        fault,
        clock: zero_clock,
    }
}

fn texts(log: &LogStream) -> Vec<(LogLevel, String)> {
    core::iter::from_fn(|| log.drain())
        .map(|e| (e.level, e.message().to_string()))
        .collect()
}

#[test]
fn test_start_with_defaults() {
    let clock = VirtualClock::new();
    let log = LogStream::new();
    let fault = FaultState::new();
    let settings = AlertSettings::default();

    let controller = start(
        &settings,
        |cfg: &SinkConfig| Ok(RecordingSink::new(cfg.sample_rate_hz)),
        ScriptedPin::idle(clock.clone()),
        FakeDelay::new(clock.clone()),
        diag(&log, &fault),
    )
    .unwrap();

    assert_eq!(controller.state(), TriggerState::Armed);
    assert_eq!(controller.player().profile().total_samples(), 88_200);

    let log = texts(&log);
    assert_eq!(
        log.first().map(|(_, m)| m.as_str()),
        Some("Initializing cat collar alert system...")
    );
    assert_eq!(
        log.last().map(|(_, m)| m.as_str()),
        Some("System ready. Waiting for trigger on GPIO10...")
    );
    assert!(log.iter().all(|(level, _)| *level == LogLevel::Info));
}

#[test]
fn test_invalid_profile_never_touches_sink() {
    let clock = VirtualClock::new();
    let log = LogStream::new();
    let fault = FaultState::new();
    let settings = AlertSettings {
        frequency_hz: 30_000.0,
        ..AlertSettings::default()
    };
    let sink_called = Cell::new(false);

    let result = start(
        &settings,
        |cfg: &SinkConfig| {
            sink_called.set(true);
            Ok(RecordingSink::new(cfg.sample_rate_hz))
        },
        ScriptedPin::idle(clock.clone()),
        FakeDelay::new(clock.clone()),
        diag(&log, &fault),
    );

    assert!(matches!(result, Err(StartupError::Config(ConfigError::AboveNyquist))));
    assert!(!sink_called.get());

    let log = texts(&log);
    let (level, last) = log.last().unwrap();
    assert_eq!(*level, LogLevel::Error);
    assert!(last.starts_with("Startup failed"));
}

#[test]
fn test_sink_init_failure_is_fatal() {
    let clock = VirtualClock::new();
    let log = LogStream::new();
    let fault = FaultState::new();

    let result = start(
        &AlertSettings::default(),
        |_: &SinkConfig| Err::<RecordingSink, _>(SinkError::Init(259)),
        ScriptedPin::idle(clock.clone()),
        FakeDelay::new(clock.clone()),
        diag(&log, &fault),
    );

    assert!(matches!(result, Err(StartupError::Sink(SinkError::Init(259)))));
    assert!(!texts(&log).iter().any(|(_, m)| m.starts_with("System ready")));
}

#[test]
fn test_sink_rate_must_match_profile() {
    let clock = VirtualClock::new();
    let log = LogStream::new();
    let fault = FaultState::new();
    let settings = AlertSettings {
        sink: SinkConfig::with_sample_rate(48_000),
        ..AlertSettings::default()
    };

    let result = start(
        &settings,
        |cfg: &SinkConfig| Ok(RecordingSink::new(cfg.sample_rate_hz)),
        ScriptedPin::idle(clock.clone()),
        FakeDelay::new(clock.clone()),
        diag(&log, &fault),
    );

    assert!(matches!(
        result,
        Err(StartupError::Config(ConfigError::SampleRateMismatch))
    ));
}

#[test]
fn test_started_controller_plays_on_trigger() {
    let clock = VirtualClock::new();
    let log = LogStream::new();
    let fault = FaultState::new();
    let settings = AlertSettings {
        duration_ms: 100,
        ..AlertSettings::default()
    };

    let mut controller = start(
        &settings,
        |cfg: &SinkConfig| Ok(RecordingSink::new(cfg.sample_rate_hz)),
        ScriptedPin::low_until(clock.clone(), 1),
        FakeDelay::new(clock.clone()),
        diag(&log, &fault),
    )
    .unwrap();

    match controller.step() {
        StepOutcome::Played(report) => assert_eq!(report.frames_written, 4_410),
        other => panic!("expected Played, got {:?}", other),
    }
}
