//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the [`ScheduleEngine`] and exposes a clean,
//! hardware-agnostic API to the control loop. All I/O flows through
//! port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  AppCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService       │
//!   RelayPort ◀── │     ScheduleEngine     │
//!                 └────────────────────────┘
//! ```

use log::info;

use crate::app::commands::AppCommand;
use crate::app::events::{AppEvent, StatusSnapshot};
use crate::app::ports::{EventSink, RelayPort};
use crate::engine::{ScheduleEngine, ValveState};

/// The application service orchestrates all domain logic.
pub struct AppService {
    engine: ScheduleEngine,
    tick_count: u64,
}

impl AppService {
    pub fn new() -> Self {
        Self {
            engine: ScheduleEngine::new(),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force the relay to its fail-safe off level before any scheduling
    /// runs. Must be called once at boot, ahead of the first tick, so a
    /// crash-restart never leaves the valve open.
    pub fn start(&mut self, relay: &mut impl RelayPort, sink: &mut impl EventSink) {
        relay.set(false);
        sink.emit(&AppEvent::Started);
        info!("AppService started, relay forced off");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance the schedule engine to `now_ms`.
    pub fn tick(&mut self, now_ms: u64, relay: &mut impl RelayPort, sink: &mut impl EventSink) {
        self.tick_count += 1;
        self.engine.tick(now_ms, relay, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command. Commands carry already-validated
    /// data; rejection happened in the handler layer.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u64,
        relay: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::Reconfigure(schedule) => {
                self.engine.reconfigure(schedule, now_ms, relay, sink);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build the status snapshot the HTTP layer publishes.
    pub fn status(&self, now_ms: u64) -> StatusSnapshot {
        let schedule = self.engine.schedule();
        StatusSnapshot {
            valve_open: self.engine.valve() == ValveState::Running,
            timer_secs: schedule.map(|s| s.period_ms / 1000),
            duration_secs: schedule.map(|s| s.duration_ms / 1000),
            opens_in_ms: self.engine.opens_in_ms(now_ms),
            closes_in_ms: self.engine.closes_in_ms(now_ms),
            generation: self.engine.generation(),
            uptime_ms: now_ms,
        }
    }

    /// Current valve state.
    pub fn valve(&self) -> ValveState {
        self.engine.valve()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for AppService {
    fn default() -> Self {
        Self::new()
    }
}
