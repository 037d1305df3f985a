//! Outbound application events and the status snapshot.
//!
//! The engine and [`AppService`](super::service::AppService) emit these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them — log to serial, publish
//! to a future telemetry channel, etc.

use serde::Serialize;

use crate::engine::Schedule;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service started; the relay has been forced to its fail-safe
    /// off level.
    Started,

    /// The valve opened at the given uptime.
    ValveOpened { at_ms: u64 },

    /// The valve closed at the given uptime.
    ValveClosed { at_ms: u64, reason: CloseReason },

    /// A validated schedule atomically replaced the previous one.
    ScheduleReplaced { schedule: Schedule, generation: u32 },
}

/// Why a `ValveClosed` transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The activation ran its configured duration.
    DurationElapsed,
    /// A reconfiguration cancelled an in-flight activation.
    Cancelled,
}

/// Point-in-time view of the controller, published by the control loop
/// for the HTTP status endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusSnapshot {
    /// Whether the valve is currently open.
    pub valve_open: bool,
    /// Active cycle period in seconds, if a schedule is armed.
    pub timer_secs: Option<u64>,
    /// Active run duration in seconds, if a schedule is armed.
    pub duration_secs: Option<u64>,
    /// Milliseconds until the next valve-on transition.
    pub opens_in_ms: Option<u64>,
    /// Milliseconds until the pending valve-off transition.
    pub closes_in_ms: Option<u64>,
    /// Schedule generation (bumps on every accepted reconfiguration).
    pub generation: u32,
    /// Device uptime in milliseconds.
    pub uptime_ms: u64,
}
