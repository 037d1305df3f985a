//! Request handlers — the seam between the HTTP transport and the core.
//!
//! The configuration handler is a pure translation step: it decodes the
//! form body, invokes the validator, and produces a redirect plus (on
//! success) the `Reconfigure` command for the control loop. It never
//! retries and never mutates engine state itself — rejected input
//! leaves the previous schedule untouched.

use log::warn;

use crate::app::commands::AppCommand;
use crate::app::validate::{validate, ConfigError};

/// Largest accepted `POST /SPRINKLER` body. The form carries two small
/// integers; anything bigger is rejected before parsing rather than
/// truncated, so a cut-off value can never install a schedule the
/// client did not send.
pub const MAX_FORM_BODY: usize = 256;

/// Body served for unregistered URIs.
pub const NOT_FOUND_BODY: &str = "404: Not found";

/// Redirect instruction for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Value for the `Location` header.
    pub location: String,
    /// HTTP status (303 See Other for both outcomes).
    pub status: u16,
}

/// Outcome of a configuration request.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigOutcome {
    /// Input validated; the transport should send the command to the
    /// control loop and redirect to the status view.
    Accepted {
        command: AppCommand,
        redirect: Redirect,
    },
    /// Input rejected; redirect back to the settings view with the
    /// reason. No command is produced.
    Rejected {
        error: ConfigError,
        redirect: Redirect,
    },
}

/// Translate a raw `POST /SPRINKLER` request body into a
/// [`ConfigOutcome`], gating on size and encoding before the form is
/// parsed. Oversized and non-UTF-8 bodies are rejected as malformed.
pub fn handle_config_request(body: &[u8]) -> ConfigOutcome {
    if body.len() > MAX_FORM_BODY {
        warn!("config rejected: {} byte body exceeds limit", body.len());
        return rejected(ConfigError::Malformed);
    }
    match core::str::from_utf8(body) {
        Ok(body) => handle_config_form(body),
        Err(_) => {
            warn!("config rejected: body is not valid UTF-8");
            rejected(ConfigError::Malformed)
        }
    }
}

/// Translate a `POST /SPRINKLER` form body into a [`ConfigOutcome`].
pub fn handle_config_form(body: &str) -> ConfigOutcome {
    let timer_raw = form_value(body, "timer").unwrap_or_default();
    let duration_raw = form_value(body, "duration").unwrap_or_default();

    match validate(&timer_raw, &duration_raw) {
        Ok(schedule) => ConfigOutcome::Accepted {
            command: AppCommand::Reconfigure(schedule),
            redirect: Redirect {
                // Display parameters only — the engine works from the
                // validated millisecond schedule, not these strings.
                location: format!(
                    "/STATUS?timer={}&duration={}",
                    schedule.period_ms / 1000,
                    schedule.duration_ms / 1000
                ),
                status: 303,
            },
        },
        Err(error) => {
            warn!("config rejected ({}): {}", error.code(), error.reason());
            rejected(error)
        }
    }
}

/// Rejection outcome: redirect back to the settings view with the
/// reason code. No command is produced.
fn rejected(error: ConfigError) -> ConfigOutcome {
    ConfigOutcome::Rejected {
        error,
        redirect: Redirect {
            location: format!("/?error={}", error.code()),
            status: 303,
        },
    }
}

// ───────────────────────────────────────────────────────────────
// Form decoding
// ───────────────────────────────────────────────────────────────

/// Extract and percent-decode a single field from an
/// `application/x-www-form-urlencoded` body. Returns `None` if the key
/// is absent; an empty value decodes to an empty string.
pub fn form_value(body: &str, key: &str) -> Option<String> {
    body.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if percent_decode(k)? == key {
            percent_decode(v)
        } else {
            None
        }
    })
}

/// Minimal percent-decoding: `+` becomes space, `%XX` becomes the byte.
/// Returns `None` on truncated or non-hex escapes and on invalid UTF-8.
fn percent_decode(input: &str) -> Option<String> {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();
    while let Some(b) = bytes.next() {
        match b {
            b'+' => out.push(b' '),
            b'%' => {
                let hi = hex_val(bytes.next()?)?;
                let lo = hex_val(bytes.next()?)?;
                out.push(hi << 4 | lo);
            }
            _ => out.push(b),
        }
    }
    String::from_utf8(out).ok()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
