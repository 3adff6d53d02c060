//! wpa_supplicant Interface proxy.

use std::collections::HashMap;
use zbus::{proxy, Result};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

/// Proxy for a managed wireless interface.
///
/// Drives scanning, network configuration and association on one radio.
#[proxy(
    interface = "fi.w1.wpa_supplicant1.Interface",
    default_service = "fi.w1.wpa_supplicant1"
)]
pub trait Interface {
    /// Triggers a scan. `args` must contain `Type` ("active" or "passive").
    fn scan(&self, args: HashMap<String, Value<'_>>) -> Result<()>;

    /// Creates a network configuration and returns its path.
    fn add_network(&self, args: HashMap<String, Value<'_>>) -> Result<OwnedObjectPath>;

    /// Disassociates from the current network.
    fn disconnect(&self) -> Result<()>;

    /// Makes the given configuration the only one the interface may use.
    fn select_network(&self, network: &ObjectPath<'_>) -> Result<()>;

    /// Reconnects using the currently selected configuration.
    fn reassociate(&self) -> Result<()>;

    /// Paths of the BSSs found by the last scan.
    #[zbus(property, name = "BSSs")]
    fn bsss(&self) -> Result<Vec<OwnedObjectPath>>;

    /// Paths of the configured networks.
    #[zbus(property)]
    fn networks(&self) -> Result<Vec<OwnedObjectPath>>;

    /// Emitted for each BSS discovered during a scan.
    #[zbus(signal, name = "BSSAdded")]
    fn bss_added(
        &self,
        path: OwnedObjectPath,
        properties: HashMap<String, OwnedValue>,
    ) -> Result<()>;

    /// Emitted when a scan finishes.
    #[zbus(signal)]
    fn scan_done(&self, success: bool) -> Result<()>;
}
