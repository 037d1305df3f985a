//! Sprinkler firmware — main entry point.
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SoftApAdapter    EspHttpServer     Esp32TimeAdapter           │
//! │  (access point)   (settings/status) (Clock)                    │
//! │  HardwareAdapter  LogEventSink                                 │
//! │  (RelayPort)      (EventSink)                                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            AppService (pure logic)                     │    │
//! │  │  Validator · ScheduleEngine                            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The HTTP task only ever validates input and sends commands over the
//! mpsc channel; every engine transition (reconfigure, valve on/off)
//! executes on this loop, so transitions are atomic relative to each
//! other and the relay line has exactly one writer.

#![deny(unused_must_use)]

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    device::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("sprinkler: this binary targets ESP-IDF; use `cargo test` on the host");
}

#[cfg(target_os = "espidf")]
mod device {
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use anyhow::Result;
    use log::{info, warn};

    use sprinkler::adapters::hardware::HardwareAdapter;
    use sprinkler::adapters::log_sink::LogEventSink;
    use sprinkler::adapters::time::Esp32TimeAdapter;
    use sprinkler::adapters::wifi::SoftApAdapter;
    use sprinkler::app::events::StatusSnapshot;
    use sprinkler::app::ports::Clock;
    use sprinkler::app::service::AppService;
    use sprinkler::config::SystemConfig;
    use sprinkler::drivers::hw_init;
    use sprinkler::drivers::relay::RelayDriver;
    use sprinkler::http::server::start_http;

    pub fn run() -> Result<()> {
        // ── 1. ESP-IDF bootstrap ──────────────────────────────
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;

        info!("sprinkler v{} booting", env!("CARGO_PKG_VERSION"));

        if let Err(e) = hw_init::init_peripherals() {
            // Peripheral init failure is critical: log and halt rather
            // than run a controller that cannot drive its valve. The
            // sleep yields to the idle task so the watchdog stays fed.
            log::error!("HAL init failed: {}, halting", e);
            loop {
                std::thread::sleep(Duration::from_secs(1));
            }
        }

        let config = SystemConfig::default();

        // ── 2. Relay to fail-safe off before anything else ────
        let mut hw = HardwareAdapter::new(RelayDriver::new(config.relay_active_low));
        let mut sink = LogEventSink::new();
        let mut app = AppService::new();
        app.start(&mut hw, &mut sink);

        let clock = Esp32TimeAdapter::new();

        // ── 3. Network bring-up ───────────────────────────────
        let mut ap = SoftApAdapter::new(&config).map_err(|e| anyhow::anyhow!("{e}"))?;
        ap.start().map_err(|e| anyhow::anyhow!("{e}"))?;

        // ── 4. HTTP surface ───────────────────────────────────
        let snapshot = Arc::new(Mutex::new(StatusSnapshot::default()));
        let (tx, rx) = mpsc::channel();
        let _server = start_http(&config, snapshot.clone(), tx)?;

        info!("system ready, entering control loop");

        // ── 5. Control loop ───────────────────────────────────
        let interval = Duration::from_millis(u64::from(config.control_loop_interval_ms));

        loop {
            // Service at most one command per pass, then tick; a
            // reconfigure is always fully applied before the next tick
            // is evaluated.
            match rx.recv_timeout(interval) {
                Ok(cmd) => {
                    let now = clock.now_ms();
                    app.handle_command(cmd, now, &mut hw, &mut sink);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    // HTTP server dropped its sender; keep ticking at
                    // the configured cadence.
                    warn!("command channel closed; continuing tick-only");
                    std::thread::sleep(interval);
                }
            }

            let now = clock.now_ms();
            app.tick(now, &mut hw, &mut sink);

            if let Ok(mut snap) = snapshot.lock() {
                *snap = app.status(now);
            }
        }
    }
}
