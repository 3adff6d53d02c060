//! Constants for the wpa_supplicant D-Bus interface.
//!
//! Bus identities, property keys and default values used when talking to
//! the daemon. See <https://w1.fi/wpa_supplicant/devel/dbus.html>.

/// Well-known bus names and object paths.
pub mod bus {
    pub const SERVICE: &str = "fi.w1.wpa_supplicant1";
    pub const NETWORK: &str = "fi.w1.wpa_supplicant1.Network";

    /// Object path the daemon uses to mean "no object".
    pub const NO_OBJECT: &str = "/";
}

/// Keys used in call arguments and property mappings.
pub mod keys {
    pub const IFNAME: &str = "Ifname";
    pub const SCAN_TYPE: &str = "Type";
    pub const SSID: &str = "ssid";
    pub const KEY_MGMT: &str = "key_mgmt";
    pub const PSK: &str = "psk";

    /// Nested configuration table of a network object.
    pub const PROPERTIES: &str = "Properties";
    pub const ENABLED: &str = "Enabled";

    /// Raw SSID entry in a `BSSAdded` property mapping.
    pub const BSS_SSID: &str = "SSID";
}

/// Key management schemes.
pub mod key_mgmt {
    pub const WPA_PSK: &str = "WPA-PSK";
}

/// Default timeouts.
pub mod timeouts {
    use std::time::Duration;

    pub const METHOD_TIMEOUT_MS: u64 = 1000;
    pub const SCAN_TIMEOUT_SECS: u64 = 30;

    pub fn method_timeout() -> Duration {
        Duration::from_millis(METHOD_TIMEOUT_MS)
    }

    pub fn scan_timeout() -> Duration {
        Duration::from_secs(SCAN_TIMEOUT_SECS)
    }
}

/// Interface the CLI manages when none is given.
pub const DEFAULT_IFNAME: &str = "wlp1s0";
