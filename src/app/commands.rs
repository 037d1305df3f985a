//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (the HTTP
//! configuration endpoint today) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.
//! Carrying an already-validated [`Schedule`] keeps the handler layer a
//! pure translation step: rejected input never produces a command.

use crate::engine::Schedule;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Atomically replace the active schedule with a validated one.
    Reconfigure(Schedule),
}
