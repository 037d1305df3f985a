//! Configuration validator.
//!
//! Parses and validates the untrusted `(timer, duration)` pair from the
//! settings form before it reaches the schedule engine. Pure — no side
//! effects, and the raw field values are never retained.
//!
//! Boundary rule: the period must be **strictly** greater than the
//! duration. Equality is rejected too, otherwise the valve would have
//! no idle time between cycles.

use crate::engine::Schedule;

/// Why a configuration request was rejected. All variants are
/// recoverable: the previous schedule (if any) stays untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No request parameters were supplied.
    Missing,
    /// A field parsed but is zero or negative.
    NonPositive,
    /// `duration >= timer` — the valve would never fully idle.
    DurationExceedsPeriod,
    /// A field is not a well-formed integer (or overflows).
    Malformed,
}

impl ConfigError {
    /// Stable short code for redirect query parameters.
    pub fn code(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NonPositive => "nonpositive",
            Self::DurationExceedsPeriod => "duration",
            Self::Malformed => "malformed",
        }
    }

    /// Human-readable reason for the requester.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Missing => "no timer/duration parameters supplied",
            Self::NonPositive => "timer and duration must be positive",
            Self::DurationExceedsPeriod => "duration must be less than the timer period",
            Self::Malformed => "timer and duration must be whole seconds",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.reason())
    }
}

/// Validate raw `timer`/`duration` field values (whole seconds) and
/// build the internal millisecond [`Schedule`] on success.
///
/// Negative numbers are well-formed integers, so they fail the
/// positivity check (`NonPositive`) rather than parsing (`Malformed`).
pub fn validate(timer_raw: &str, duration_raw: &str) -> Result<Schedule, ConfigError> {
    let timer_raw = timer_raw.trim();
    let duration_raw = duration_raw.trim();
    if timer_raw.is_empty() || duration_raw.is_empty() {
        return Err(ConfigError::Missing);
    }

    let timer_secs: i64 = timer_raw.parse().map_err(|_| ConfigError::Malformed)?;
    let duration_secs: i64 = duration_raw.parse().map_err(|_| ConfigError::Malformed)?;

    if timer_secs <= 0 || duration_secs <= 0 {
        return Err(ConfigError::NonPositive);
    }
    if duration_secs >= timer_secs {
        return Err(ConfigError::DurationExceedsPeriod);
    }

    let period_ms = (timer_secs as u64)
        .checked_mul(1000)
        .ok_or(ConfigError::Malformed)?;
    let duration_ms = (duration_secs as u64)
        .checked_mul(1000)
        .ok_or(ConfigError::Malformed)?;

    Ok(Schedule {
        period_ms,
        duration_ms,
    })
}
