//! System configuration parameters.
//!
//! All tunable parameters for the sprinkler controller. The schedule
//! itself is *not* part of this struct — it lives only in the engine
//! and is deliberately not persisted across power loss.

use serde::{Deserialize, Serialize};

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Access point ---
    /// SSID of the self-hosted configuration access point.
    pub ap_ssid: heapless::String<32>,
    /// WPA2 passphrase for the access point.
    pub ap_password: heapless::String<64>,

    // --- Relay ---
    /// Whether the relay module is active-low (common for cheap boards).
    pub relay_active_low: bool,

    // --- Timing ---
    /// Control loop interval (milliseconds). The engine's effective
    /// resolution; must stay well under one second.
    pub control_loop_interval_ms: u32,

    // --- Settings form defaults ---
    /// Pre-filled cycle period on the settings page (seconds).
    pub default_timer_secs: u32,
    /// Pre-filled run duration on the settings page (seconds).
    pub default_duration_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            ap_ssid: heapless::String::try_from("SprinklerSystem").unwrap(),
            ap_password: heapless::String::try_from("1234567890").unwrap(),

            relay_active_low: false,

            control_loop_interval_ms: 250, // 4 Hz

            default_timer_secs: 60,
            default_duration_secs: 10,
        }
    }
}
