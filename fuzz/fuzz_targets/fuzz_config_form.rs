//! Fuzzes the form decoder and validator with arbitrary request bodies.
//!
//! The configuration endpoint is the only surface that accepts
//! untrusted bytes; whatever arrives, the handler must return an
//! outcome rather than panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use sprinkler::http::handlers::{form_value, handle_config_request, ConfigOutcome, MAX_FORM_BODY};

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = core::str::from_utf8(data) {
        let _ = form_value(body, "timer");
        let _ = form_value(body, "duration");
    }

    match handle_config_request(data) {
        ConfigOutcome::Accepted { command, .. } => {
            assert!(data.len() <= MAX_FORM_BODY);
            let sprinkler::app::commands::AppCommand::Reconfigure(schedule) = command;
            assert!(schedule.duration_ms < schedule.period_ms);
        }
        ConfigOutcome::Rejected { .. } => {}
    }
});
