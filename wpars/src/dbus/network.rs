//! wpa_supplicant Network proxy.

use zbus::{proxy, Result};

/// Proxy for a network configuration object.
///
/// The `Properties` table is not declared here: its values are nested
/// variants, so it is read through `org.freedesktop.DBus.Properties.GetAll`.
#[proxy(
    interface = "fi.w1.wpa_supplicant1.Network",
    default_service = "fi.w1.wpa_supplicant1"
)]
pub trait Network {
    /// Whether the configuration is enabled.
    #[zbus(property)]
    fn enabled(&self) -> Result<bool>;
}
