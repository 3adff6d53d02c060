//! wpa_supplicant root object proxy.

use std::collections::HashMap;
use zbus::{proxy, Result};
use zvariant::{OwnedObjectPath, Value};

/// Proxy for the root `fi.w1.wpa_supplicant1` interface.
///
/// Manages the set of interfaces the daemon controls.
#[proxy(
    interface = "fi.w1.wpa_supplicant1",
    default_service = "fi.w1.wpa_supplicant1",
    default_path = "/fi/w1/wpa_supplicant1"
)]
pub trait WpaSupplicant {
    /// Returns the path of an interface the daemon already manages.
    fn get_interface(&self, ifname: &str) -> Result<OwnedObjectPath>;

    /// Registers a new interface. `args` must contain at least `Ifname`.
    fn create_interface(&self, args: HashMap<String, Value<'_>>) -> Result<OwnedObjectPath>;
}
