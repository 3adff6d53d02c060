//! wpa_supplicant BSS proxy.

use zbus::{proxy, Result};

/// Proxy for one scan result.
#[proxy(
    interface = "fi.w1.wpa_supplicant1.BSS",
    default_service = "fi.w1.wpa_supplicant1"
)]
pub trait Bss {
    /// SSID as raw bytes (may not be valid UTF-8).
    #[zbus(property, name = "SSID")]
    fn ssid(&self) -> Result<Vec<u8>>;
}
