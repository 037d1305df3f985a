//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to              |
//! |------------|-------------|--------------------------|
//! | `hardware` | RelayPort   | ESP32 GPIO               |
//! | `log_sink` | EventSink   | Serial log output        |
//! | `time`     | Clock       | ESP32 system timer       |
//! | `wifi`     | —           | ESP-IDF WiFi softAP      |

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod wifi;
