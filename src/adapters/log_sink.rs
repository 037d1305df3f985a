//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future MQTT or telemetry adapter would implement the same trait.

use log::info;

use crate::app::events::{AppEvent, CloseReason};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | relay at fail-safe off");
            }
            AppEvent::ValveOpened { at_ms } => {
                info!("VALVE | open at t={}ms", at_ms);
            }
            AppEvent::ValveClosed { at_ms, reason } => {
                let why = match reason {
                    CloseReason::DurationElapsed => "duration elapsed",
                    CloseReason::Cancelled => "cancelled by reconfigure",
                };
                info!("VALVE | closed at t={}ms ({})", at_ms, why);
            }
            AppEvent::ScheduleReplaced {
                schedule,
                generation,
            } => {
                info!(
                    "SCHED | gen {} | period={}s duration={}s",
                    generation,
                    schedule.period_ms / 1000,
                    schedule.duration_ms / 1000,
                );
            }
        }
    }
}
