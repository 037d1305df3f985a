//! Valve relay driver.
//!
//! Single digital output with selectable polarity (cheap relay boards
//! are often active-low). The on-board status LED mirrors the relay so
//! the valve state is visible without opening the enclosure.
//!
//! ## Safety contract
//!
//! The idle level is "off" — the driver is a dumb actuator and the
//! schedule engine is its only caller. `set` is idempotent.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct RelayDriver {
    on: bool,
    active_low: bool,
}

impl RelayDriver {
    /// Create the driver and drive the output to the off level.
    pub fn new(active_low: bool) -> Self {
        let mut driver = Self {
            on: false,
            active_low,
        };
        driver.apply(false);
        driver
    }

    pub fn set(&mut self, on: bool) {
        self.apply(on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    fn apply(&mut self, on: bool) {
        let level = if self.active_low { !on } else { on };
        hw_init::gpio_write(pins::RELAY_GPIO, level);
        // LED is always active-high, regardless of relay polarity.
        hw_init::gpio_write(pins::STATUS_LED_GPIO, on);
    }
}
