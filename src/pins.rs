//! GPIO pin assignments for the sprinkler controller board.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers.

/// Digital output driving the valve relay module (IN pin).
pub const RELAY_GPIO: i32 = 4;

/// On-board status LED, mirrors the relay for visual feedback.
pub const STATUS_LED_GPIO: i32 = 2;
