//! ESP-IDF HTTP server wiring (device only).
//!
//! Registers the routes on [`EspHttpServer`] and delegates every
//! decision to the pure [`handlers`](super::handlers) module. The
//! server task never touches the engine: accepted configurations are
//! sent over the mpsc channel and applied by the control loop, and the
//! status endpoint reads the snapshot the loop publishes. A wildcard
//! route catches every unregistered URI with a plain-text 404.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use esp_idf_svc::http::Method;
use esp_idf_svc::io::{Read, Write};
use log::{info, warn};

use crate::app::commands::AppCommand;
use crate::app::events::StatusSnapshot;
use crate::config::SystemConfig;
use crate::http::handlers::{handle_config_request, ConfigOutcome, MAX_FORM_BODY, NOT_FOUND_BODY};
use crate::http::pages;

/// Start the HTTP server. The returned handle must stay alive for the
/// routes to keep working.
pub fn start_http(
    config: &SystemConfig,
    snapshot: Arc<Mutex<StatusSnapshot>>,
    commands: Sender<AppCommand>,
) -> Result<EspHttpServer<'static>> {
    let server_cfg = Configuration {
        stack_size: 8 * 1024,
        // Needed for the catch-all "/*" route below.
        uri_match_wildcard: true,
        ..Default::default()
    };
    let mut server = EspHttpServer::new(&server_cfg)?;

    // --- GET / : settings form ---
    {
        let page = pages::settings_page(config.default_timer_secs, config.default_duration_secs);
        server.fn_handler("/", Method::Get, move |req| -> Result<()> {
            let headers = [("Content-Type", "text/html; charset=utf-8")];
            let mut resp = req.into_response(200, Some("OK"), &headers)?;
            resp.write_all(page.as_bytes())?;
            Ok(())
        })?;
    }

    // --- GET /STATUS : countdown page (display params in the query) ---
    server.fn_handler("/STATUS", Method::Get, move |req| -> Result<()> {
        let headers = [("Content-Type", "text/html; charset=utf-8")];
        let mut resp = req.into_response(200, Some("OK"), &headers)?;
        resp.write_all(pages::STATUS_PAGE.as_bytes())?;
        Ok(())
    })?;

    // --- GET /api : JSON snapshot ---
    {
        let snapshot = snapshot.clone();
        server.fn_handler("/api", Method::Get, move |req| -> Result<()> {
            let json = {
                let snap = snapshot
                    .lock()
                    .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))?;
                serde_json::to_string(&*snap)?
            };
            let headers = [("Content-Type", "application/json")];
            let mut resp = req.into_response(200, Some("OK"), &headers)?;
            resp.write_all(json.as_bytes())?;
            Ok(())
        })?;
    }

    // --- POST /SPRINKLER : configuration endpoint ---
    {
        let commands = commands.clone();
        server.fn_handler("/SPRINKLER", Method::Post, move |mut req| -> Result<()> {
            // One spare byte so an oversized body is seen as oversized
            // instead of silently parsing as its truncated prefix.
            let mut buf = [0u8; MAX_FORM_BODY + 1];
            let mut len = 0;
            while len < buf.len() {
                let n = req.read(&mut buf[len..])?;
                if n == 0 {
                    break;
                }
                len += n;
            }

            let redirect = match handle_config_request(&buf[..len]) {
                ConfigOutcome::Accepted { command, redirect } => {
                    if commands.send(command).is_err() {
                        // Control loop gone; nothing to reconfigure.
                        warn!("http: dropping config, control loop is not running");
                    }
                    redirect
                }
                ConfigOutcome::Rejected { redirect, .. } => redirect,
            };

            let headers = [("Location", redirect.location.as_str())];
            let mut resp = req.into_response(redirect.status, Some("See Other"), &headers)?;
            resp.write_all(&[])?;
            Ok(())
        })?;
    }

    // --- anything else: plain-text 404 ---
    // Registered last; with wildcard matching enabled the exact routes
    // above still win for their own URIs.
    for method in [Method::Get, Method::Post] {
        server.fn_handler("/*", method, move |req| -> Result<()> {
            let headers = [("Content-Type", "text/plain")];
            let mut resp = req.into_response(404, Some("Not Found"), &headers)?;
            resp.write_all(NOT_FOUND_BODY.as_bytes())?;
            Ok(())
        })?;
    }

    info!("HTTP server started on port 80");
    Ok(server)
}
