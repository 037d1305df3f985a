//! WiFi softAP adapter.
//!
//! The controller hosts its own access point — there is no station
//! mode and no upstream network. Credential validation runs on every
//! target; the actual radio bring-up is cfg-gated.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via
//!   `esp_idf_svc::wifi` (blocking AP bring-up).
//! - **all other targets**: simulation stubs for host-side tests.

use core::fmt;
use log::info;

use crate::config::SystemConfig;

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApError {
    InvalidSsid,
    InvalidPassword,
    AlreadyRunning,
    StartFailed,
}

impl fmt::Display for ApError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2)")
            }
            Self::AlreadyRunning => write!(f, "access point already running"),
            Self::StartFailed => write!(f, "access point bring-up failed"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ApError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ApError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ApError> {
    // The configuration surface is unauthenticated HTTP; WPA2 on the AP
    // is the only access control, so an open network is not allowed.
    if password.len() < 8 || password.len() > 64 {
        return Err(ApError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// SoftAP adapter
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApState {
    Stopped,
    Running,
}

#[cfg_attr(not(target_os = "espidf"), derive(Debug))]
pub struct SoftApAdapter {
    state: ApState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    #[cfg(target_os = "espidf")]
    wifi: Option<
        esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>,
    >,
}

impl SoftApAdapter {
    /// Build the adapter from config, validating the credentials.
    pub fn new(config: &SystemConfig) -> Result<Self, ApError> {
        validate_ssid(&config.ap_ssid)?;
        validate_password(&config.ap_password)?;
        Ok(Self {
            state: ApState::Stopped,
            ssid: config.ap_ssid.clone(),
            password: config.ap_password.clone(),
            #[cfg(target_os = "espidf")]
            wifi: None,
        })
    }

    pub fn state(&self) -> ApState {
        self.state
    }

    /// Bring the access point up. Blocks until the AP netif is ready.
    pub fn start(&mut self) -> Result<(), ApError> {
        if self.state == ApState::Running {
            return Err(ApError::AlreadyRunning);
        }
        self.platform_start()?;
        self.state = ApState::Running;
        info!("softAP: '{}' up", self.ssid);
        Ok(())
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self) -> Result<(), ApError> {
        use esp_idf_hal::peripherals::Peripherals;
        use esp_idf_svc::eventloop::EspSystemEventLoop;
        use esp_idf_svc::nvs::EspDefaultNvsPartition;
        use esp_idf_svc::wifi::{
            AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration, EspWifi,
        };
        use log::error;

        let fail = |what: &str| {
            move |e| {
                error!("softAP: {} failed — {:?}", what, e);
                ApError::StartFailed
            }
        };

        let peripherals = Peripherals::take().map_err(fail("peripherals"))?;
        let sysloop = EspSystemEventLoop::take().map_err(fail("event loop"))?;
        let nvs = EspDefaultNvsPartition::take().map_err(fail("nvs"))?;

        let esp_wifi =
            EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs)).map_err(fail("wifi"))?;
        let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop).map_err(fail("wrap"))?;

        wifi.set_configuration(&Configuration::AccessPoint(AccessPointConfiguration {
            ssid: self.ssid.as_str().try_into().map_err(|()| ApError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|()| ApError::InvalidPassword)?,
            auth_method: AuthMethod::WPA2Personal,
            ..Default::default()
        }))
        .map_err(fail("set configuration"))?;

        wifi.start().map_err(fail("start"))?;
        wifi.wait_netif_up().map_err(fail("netif up"))?;

        self.wifi = Some(wifi);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self) -> Result<(), ApError> {
        info!("softAP(sim): '{}' started", self.ssid);
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
