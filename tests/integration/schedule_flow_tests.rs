//! Schedule lifecycle through the full application service.
//!
//! Drives [`AppService`] the way the control loop does, with a fake
//! clock stepping at the 250ms tick cadence, and asserts on relay call
//! history and emitted events.

use crate::mock_hw::{FakeClock, MockRelay, RecordingSink};

use sprinkler::app::commands::AppCommand;
use sprinkler::app::events::{AppEvent, CloseReason};
use sprinkler::app::ports::{Clock, RelayPort};
use sprinkler::app::service::AppService;
use sprinkler::engine::{Schedule, ValveState};

const TICK_MS: u64 = 250;

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

fn reconfigure(
    app: &mut AppService,
    clock: &FakeClock,
    relay: &mut MockRelay,
    sink: &mut RecordingSink,
    timer_secs: u64,
    duration_secs: u64,
) {
    app.handle_command(
        AppCommand::Reconfigure(Schedule {
            period_ms: timer_secs * 1000,
            duration_ms: duration_secs * 1000,
        }),
        clock.now_ms(),
        relay,
        sink,
    );
}

#[test]
fn boot_forces_relay_off_and_emits_started() {
    let mut app = AppService::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);

    assert_eq!(relay.calls, vec![false]);
    assert_eq!(sink.events, vec![AppEvent::Started]);
    assert_eq!(app.valve(), ValveState::Idle);
}

#[test]
fn full_cycle_runs_at_configured_cadence() {
    // 10s period, 3s duration: open at t=10s, close at t=13s, reopen at
    // t=20s, with nothing before the first full period elapses.
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);
    reconfigure(&mut app, &clock, &mut relay, &mut sink, 10, 3);

    tick_until(&mut app, &clock, &mut relay, &mut sink, 9_750);
    assert!(!relay.is_on(), "no activation before one full period");

    tick_until(&mut app, &clock, &mut relay, &mut sink, 10_000);
    assert!(relay.is_on(), "opens at t=10s");
    assert!(sink.events.contains(&AppEvent::ValveOpened { at_ms: 10_000 }));

    tick_until(&mut app, &clock, &mut relay, &mut sink, 13_000);
    assert!(!relay.is_on(), "closes at t=13s");
    assert!(sink.events.contains(&AppEvent::ValveClosed {
        at_ms: 13_000,
        reason: CloseReason::DurationElapsed,
    }));

    tick_until(&mut app, &clock, &mut relay, &mut sink, 20_000);
    assert!(relay.is_on(), "reopens one period after the first open");
}

#[test]
fn reconfigure_while_idle_replaces_pending_activation() {
    // (10s, 3s) at t=0, replaced with (5s, 2s) at t=4s: the old t=10s
    // deadline is cancelled and the valve opens at t=9s instead.
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);
    reconfigure(&mut app, &clock, &mut relay, &mut sink, 10, 3);

    tick_until(&mut app, &clock, &mut relay, &mut sink, 4_000);
    reconfigure(&mut app, &clock, &mut relay, &mut sink, 5, 2);

    tick_until(&mut app, &clock, &mut relay, &mut sink, 8_750);
    assert!(!relay.is_on());

    tick_until(&mut app, &clock, &mut relay, &mut sink, 9_000);
    assert!(relay.is_on(), "opens at t=9s under the new schedule");

    tick_until(&mut app, &clock, &mut relay, &mut sink, 11_000);
    assert!(!relay.is_on(), "closes at t=11s");

    // Only the one open/close pair happened.
    let boot_off = 1;
    assert_eq!(relay.calls[boot_off..], [true, false]);
}

#[test]
fn reconfigure_mid_activation_cancels_and_rephases() {
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);
    reconfigure(&mut app, &clock, &mut relay, &mut sink, 10, 3);
    tick_until(&mut app, &clock, &mut relay, &mut sink, 11_000);
    assert!(relay.is_on(), "mid-activation at t=11s");

    reconfigure(&mut app, &clock, &mut relay, &mut sink, 10, 3);
    assert!(!relay.is_on(), "reconfigure closes the valve immediately");
    assert!(sink.events.contains(&AppEvent::ValveClosed {
        at_ms: 11_000,
        reason: CloseReason::Cancelled,
    }));

    tick_until(&mut app, &clock, &mut relay, &mut sink, 20_750);
    assert!(!relay.is_on(), "phase restarts from the reconfigure");
    tick_until(&mut app, &clock, &mut relay, &mut sink, 21_000);
    assert!(relay.is_on());
}

#[test]
fn opened_intervals_never_exceed_duration() {
    // Run several cycles and check every Opened/Closed pair in the
    // event stream spans exactly the configured duration.
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);
    reconfigure(&mut app, &clock, &mut relay, &mut sink, 7, 2);
    tick_until(&mut app, &clock, &mut relay, &mut sink, 60_000);

    let mut opened_at = None;
    let mut cycles = 0;
    for event in &sink.events {
        match *event {
            AppEvent::ValveOpened { at_ms } => {
                assert!(opened_at.is_none(), "open while already open");
                opened_at = Some(at_ms);
            }
            AppEvent::ValveClosed { at_ms, .. } => {
                let open = opened_at.take().unwrap();
                assert_eq!(at_ms - open, 2_000);
                cycles += 1;
            }
            _ => {}
        }
    }
    assert_eq!(cycles, 8, "60s of a 7s cycle starting at t=7s");
}

#[test]
fn status_snapshot_tracks_engine_state() {
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);

    let idle = app.status(clock.now_ms());
    assert!(!idle.valve_open);
    assert!(idle.timer_secs.is_none());
    assert!(idle.opens_in_ms.is_none());

    reconfigure(&mut app, &clock, &mut relay, &mut sink, 10, 3);
    tick_until(&mut app, &clock, &mut relay, &mut sink, 4_000);

    let armed = app.status(clock.now_ms());
    assert_eq!(armed.timer_secs, Some(10));
    assert_eq!(armed.duration_secs, Some(3));
    assert_eq!(armed.opens_in_ms, Some(6_000));
    assert_eq!(armed.closes_in_ms, None);
    assert_eq!(armed.generation, 1);

    tick_until(&mut app, &clock, &mut relay, &mut sink, 11_000);
    let open = app.status(clock.now_ms());
    assert!(open.valve_open);
    assert_eq!(open.closes_in_ms, Some(2_000));
    assert_eq!(open.uptime_ms, 11_000);
}

#[test]
fn status_snapshot_serializes_for_the_api() {
    let mut app = AppService::new();
    let clock = FakeClock::new();
    let mut relay = MockRelay::new();
    let mut sink = RecordingSink::new();

    app.start(&mut relay, &mut sink);
    reconfigure(&mut app, &clock, &mut relay, &mut sink, 10, 3);

    let json = serde_json::to_value(app.status(0)).unwrap();
    assert_eq!(json["valve_open"], false);
    assert_eq!(json["timer_secs"], 10);
    assert_eq!(json["duration_secs"], 3);
    assert_eq!(json["opens_in_ms"], 10_000);
    assert_eq!(json["generation"], 1);
}
