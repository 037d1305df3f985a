//! Schedule engine — the irrigation state machine.
//!
//! Owns the single active [`Schedule`] and the derived valve state.
//! The engine is driven from the control loop by two calls:
//!
//! ```text
//! ┌───────────────┐   Reconfigure(Schedule)   ┌────────────────────┐
//! │ HTTP handler  │ ─────────────────────────▶│                    │
//! └───────────────┘                           │   ScheduleEngine   │──▶ RelayPort
//! ┌───────────────┐   tick(now_ms)            │   {Idle, Running}  │──▶ EventSink
//! │ control loop  │ ─────────────────────────▶│                    │
//! └───────────────┘                           └────────────────────┘
//! ```
//!
//! Timing is expressed as two pending-deadline slots against an
//! injected monotonic clock (milliseconds since boot), so tests drive
//! the engine with a fake clock instead of real time. Reconfiguration
//! clears both slots and bumps a generation counter, which is the only
//! cancellation path in the system.

use log::info;

use crate::app::events::{AppEvent, CloseReason};
use crate::app::ports::{EventSink, RelayPort};

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// The single authoritative irrigation plan.
///
/// Only the validator constructs these, so `duration_ms < period_ms`
/// holds for every value that reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Time between successive valve activations.
    pub period_ms: u64,
    /// How long the valve stays open each activation.
    pub duration_ms: u64,
}

/// Derived valve state — never stored independently of the relay
/// commands the engine has issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveState {
    /// Relay off, no pending off-deadline.
    Idle,
    /// Relay on, off-deadline armed.
    Running,
}

// ═══════════════════════════════════════════════════════════════
//  Engine
// ═══════════════════════════════════════════════════════════════

/// The scheduling/actuation state machine.
///
/// The relay output line is mutated exclusively through this struct's
/// transitions; request handling never touches it directly.
pub struct ScheduleEngine {
    schedule: Option<Schedule>,
    valve: ValveState,
    /// Deadline for the next valve-on transition, if a schedule is armed.
    pending_on_ms: Option<u64>,
    /// Deadline for the pending valve-off transition while `Running`.
    pending_off_ms: Option<u64>,
    /// Bumped on every reconfiguration; identifies which schedule a
    /// deadline belonged to in logs and events.
    generation: u32,
    /// When the current activation opened the valve (for the safety
    /// invariant check and status countdowns).
    opened_at_ms: Option<u64>,
}

impl ScheduleEngine {
    pub fn new() -> Self {
        Self {
            schedule: None,
            valve: ValveState::Idle,
            pending_on_ms: None,
            pending_off_ms: None,
            generation: 0,
            opened_at_ms: None,
        }
    }

    /// Atomically replace the active schedule.
    ///
    /// Cancels both pending deadlines, forces the relay off if an
    /// activation is in flight (a shortened new schedule must never
    /// inherit a stale open valve), and arms the first activation one
    /// full period from `now_ms` — reconfiguration resets phase, it
    /// does not open the valve immediately.
    pub fn reconfigure(
        &mut self,
        schedule: Schedule,
        now_ms: u64,
        relay: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) {
        debug_assert!(
            schedule.duration_ms < schedule.period_ms,
            "validation upstream must reject duration >= period"
        );

        if self.valve == ValveState::Running {
            relay.set(false);
            self.valve = ValveState::Idle;
            self.opened_at_ms = None;
            sink.emit(&AppEvent::ValveClosed {
                at_ms: now_ms,
                reason: CloseReason::Cancelled,
            });
        }

        self.pending_off_ms = None;
        self.generation = self.generation.wrapping_add(1);
        self.schedule = Some(schedule);
        self.pending_on_ms = Some(now_ms + schedule.period_ms);

        info!(
            "engine: schedule gen {} armed (period {}ms, duration {}ms), first open at t+{}ms",
            self.generation, schedule.period_ms, schedule.duration_ms, schedule.period_ms
        );
        sink.emit(&AppEvent::ScheduleReplaced {
            schedule,
            generation: self.generation,
        });
    }

    /// Advance the engine to `now_ms`. Call once per control loop tick.
    ///
    /// The off-deadline is evaluated before the on-deadline, so when
    /// both are due on the same tick the valve closes before the next
    /// activation is considered.
    pub fn tick(&mut self, now_ms: u64, relay: &mut impl RelayPort, sink: &mut impl EventSink) {
        if let Some(off_ms) = self.pending_off_ms {
            if now_ms >= off_ms {
                self.pending_off_ms = None;
                self.opened_at_ms = None;
                self.valve = ValveState::Idle;
                relay.set(false);
                info!("engine: valve closed (duration elapsed)");
                sink.emit(&AppEvent::ValveClosed {
                    at_ms: now_ms,
                    reason: CloseReason::DurationElapsed,
                });
            }
        }

        if let Some(on_ms) = self.pending_on_ms {
            if now_ms >= on_ms {
                if self.valve == ValveState::Running {
                    // Two concurrent activations would mean a deadline
                    // from a cancelled schedule survived. Leave the
                    // on-deadline armed; it fires once the valve idles.
                    debug_assert!(false, "on-deadline due while valve is running");
                    return;
                }
                let Some(schedule) = self.schedule else {
                    debug_assert!(false, "pending on-deadline without a schedule");
                    self.pending_on_ms = None;
                    return;
                };
                self.valve = ValveState::Running;
                self.opened_at_ms = Some(now_ms);
                self.pending_off_ms = Some(now_ms + schedule.duration_ms);
                // Anchor the next cycle on the actual open time so a
                // stalled loop drifts phase instead of stacking
                // activations (duration < period keeps off before on).
                self.pending_on_ms = Some(now_ms + schedule.period_ms);
                relay.set(true);
                info!(
                    "engine: valve open for {}ms (gen {})",
                    schedule.duration_ms, self.generation
                );
                sink.emit(&AppEvent::ValveOpened { at_ms: now_ms });
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn valve(&self) -> ValveState {
        self.valve
    }

    pub fn schedule(&self) -> Option<Schedule> {
        self.schedule
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Milliseconds until the next valve-on transition.
    pub fn opens_in_ms(&self, now_ms: u64) -> Option<u64> {
        self.pending_on_ms.map(|on| on.saturating_sub(now_ms))
    }

    /// Milliseconds until the pending valve-off transition.
    pub fn closes_in_ms(&self, now_ms: u64) -> Option<u64> {
        self.pending_off_ms.map(|off| off.saturating_sub(now_ms))
    }

    /// How long the valve has been open in the current activation.
    pub fn open_for_ms(&self, now_ms: u64) -> Option<u64> {
        self.opened_at_ms.map(|t| now_ms.saturating_sub(t))
    }
}

impl Default for ScheduleEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
