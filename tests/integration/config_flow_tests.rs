//! Configuration flow: raw form body in, relay behaviour out.
//!
//! Covers the transport seam end to end: the handler decodes and
//! validates, an accepted outcome becomes a command to the service, a
//! rejected one leaves the running schedule untouched.

use crate::mock_hw::{FakeClock, MockRelay, RecordingSink};

use sprinkler::app::ports::{Clock, RelayPort};
use sprinkler::app::service::AppService;
use sprinkler::app::validate::ConfigError;
use sprinkler::http::handlers::{handle_config_form, ConfigOutcome};

const TICK_MS: u64 = 250;

/// Apply a form submission the way the firmware does: validate in the
/// handler, forward the command to the service only on acceptance.
fn submit(
    app: &mut AppService,
    clock: &FakeClock,
    relay: &mut MockRelay,
    sink: &mut RecordingSink,
    body: &str,
) -> ConfigOutcome {
    let outcome = handle_config_form(body);
    if let ConfigOutcome::Accepted { command, .. } = &outcome {
        app.handle_command(command.clone(), clock.now_ms(), relay, sink);
    }
    outcome
}

fn tick_until(
    app: &mut AppService,
    clock: &FakeClock,
    relay: &mut MockRelay,
    sink: &mut RecordingSink,
    until_ms: u64,
) {
    while clock.now_ms() < until_ms {
        clock.advance(TICK_MS);
        app.tick(clock.now_ms(), relay, sink);
    }
}

#[test]
fn accepted_form_drives_the_relay() {
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);

    let outcome = submit(&mut app, &clock, &mut relay, &mut sink, "timer=10&duration=3");
    match outcome {
        ConfigOutcome::Accepted { redirect, .. } => {
            assert_eq!(redirect.location, "/STATUS?timer=10&duration=3");
            assert_eq!(redirect.status, 303);
        }
        other => panic!("expected Accepted, got {:?}", other),
    }

    tick_until(&mut app, &clock, &mut relay, &mut sink, 10_000);
    assert!(relay.is_on(), "valve opens one period after submission");
    tick_until(&mut app, &clock, &mut relay, &mut sink, 13_000);
    assert!(!relay.is_on());
}

#[test]
fn rejected_form_leaves_running_schedule_untouched() {
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);
    submit(&mut app, &clock, &mut relay, &mut sink, "timer=10&duration=3");
    let generation = app.status(clock.now_ms()).generation;

    // duration >= timer is rejected, even mid-flight.
    tick_until(&mut app, &clock, &mut relay, &mut sink, 4_000);
    let outcome = submit(&mut app, &clock, &mut relay, &mut sink, "timer=5&duration=5");
    match outcome {
        ConfigOutcome::Rejected { error, redirect } => {
            assert_eq!(error, ConfigError::DurationExceedsPeriod);
            assert_eq!(redirect.location, "/?error=duration");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }

    // The original schedule still fires on its original phase.
    assert_eq!(app.status(clock.now_ms()).generation, generation);
    tick_until(&mut app, &clock, &mut relay, &mut sink, 10_000);
    assert!(relay.is_on(), "original t=10s activation unaffected");
}

#[test]
fn rejected_form_while_open_does_not_close_the_valve() {
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);
    submit(&mut app, &clock, &mut relay, &mut sink, "timer=10&duration=3");
    tick_until(&mut app, &clock, &mut relay, &mut sink, 11_000);
    assert!(relay.is_on());

    submit(&mut app, &clock, &mut relay, &mut sink, "timer=abc&duration=3");
    assert!(relay.is_on(), "rejection must not touch the relay");

    tick_until(&mut app, &clock, &mut relay, &mut sink, 13_000);
    assert!(!relay.is_on(), "close still happens on schedule");
}

#[test]
fn each_rejection_reason_maps_to_a_settings_redirect() {
    let cases = [
        ("", ConfigError::Missing),
        ("timer=10", ConfigError::Missing),
        ("timer=-1&duration=3", ConfigError::NonPositive),
        ("timer=10&duration=0", ConfigError::NonPositive),
        ("timer=10&duration=10", ConfigError::DurationExceedsPeriod),
        ("timer=1e3&duration=3", ConfigError::Malformed),
    ];
    for (body, expected) in cases {
        match handle_config_form(body) {
            ConfigOutcome::Rejected { error, redirect } => {
                assert_eq!(error, expected, "{}", body);
                assert_eq!(redirect.location, format!("/?error={}", expected.code()));
                assert_eq!(redirect.status, 303);
            }
            other => panic!("expected Rejected for {:?}, got {:?}", body, other),
        }
    }
}

#[test]
fn urlencoded_values_are_decoded_before_validation() {
    // "%31%30" is "10"; "+3+" decodes to " 3 " which trims clean.
    let outcome = handle_config_form("timer=%31%30&duration=+3+");
    assert!(matches!(outcome, ConfigOutcome::Accepted { .. }));
}

#[test]
fn resubmitting_same_values_still_restarts_phase() {
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);
    submit(&mut app, &clock, &mut relay, &mut sink, "timer=10&duration=3");
    tick_until(&mut app, &clock, &mut relay, &mut sink, 6_000);

    // Same values again at t=6s: deadline moves to t=16s.
    submit(&mut app, &clock, &mut relay, &mut sink, "timer=10&duration=3");
    tick_until(&mut app, &clock, &mut relay, &mut sink, 15_750);
    assert!(!relay.is_on(), "old t=10s deadline no longer fires");
    tick_until(&mut app, &clock, &mut relay, &mut sink, 16_000);
    assert!(relay.is_on());
}
