//! Hardware adapter — bridges the relay driver to the domain port.
//!
//! This is the only module in the system that hands actuator access to
//! the domain. On non-espidf targets the underlying driver uses
//! cfg-gated simulation stubs, so the adapter works in host tests too.

use crate::app::ports::RelayPort;
use crate::drivers::relay::RelayDriver;

/// Concrete adapter that exposes the board's actuators behind port traits.
pub struct HardwareAdapter {
    relay: RelayDriver,
}

impl HardwareAdapter {
    pub fn new(relay: RelayDriver) -> Self {
        Self { relay }
    }
}

impl RelayPort for HardwareAdapter {
    fn set(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn is_on(&self) -> bool {
        self.relay.is_on()
    }
}
