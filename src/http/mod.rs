//! HTTP configuration surface.
//!
//! | Module     | Runs on | Contents                                  |
//! |------------|---------|-------------------------------------------|
//! | `handlers` | host+device | pure request translation (core seam)  |
//! | `pages`    | host+device | static settings/status HTML           |
//! | `server`   | device only | `EspHttpServer` route registration    |
//!
//! The transport itself is a thin wrapper: every decision (validation,
//! redirect target, command emission) lives in [`handlers`], which is
//! fully host-testable.

pub mod handlers;
pub mod pages;

#[cfg(target_os = "espidf")]
pub mod server;
