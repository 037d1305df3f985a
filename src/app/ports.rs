//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ScheduleEngine / AppService (domain)
//! ```
//!
//! Driven adapters (relay, clock, event sinks) implement these traits.
//! The domain consumes them via generics, so the core never touches
//! hardware directly and tests substitute mocks.

use crate::app::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the valve relay.
///
/// `set` is idempotent and infallible at this layer: real I/O faults
/// are out of scope for the control logic, which only guarantees the
/// *sequence* of commands. The engine is the sole caller, so
/// implementations need no synchronisation of their own.
pub trait RelayPort {
    /// Drive the relay output. `true` opens the valve.
    fn set(&mut self, on: bool);

    /// Last commanded level (for status reporting and tests).
    fn is_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: time source → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source, milliseconds since boot.
///
/// The schedule is relative to device uptime, never wall-clock time,
/// so this is the only notion of time the domain sees.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go (serial log, future MQTT, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
