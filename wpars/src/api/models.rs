//! Data models for wpa_supplicant operations.
//!
//! Handles, network names, scan and connection outcomes, timeout settings
//! and the crate's error type.

use std::fmt::{Display, Formatter, Write};
use std::time::Duration;
use thiserror::Error;
use zvariant::OwnedObjectPath;

use crate::types::constants::timeouts;
use crate::types::value::PropValue;

/// A managed wireless interface on the daemon.
///
/// Obtained once via [`Supplicant::acquire_interface`](crate::Supplicant::acquire_interface)
/// and reused for every subsequent call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Kernel interface name (e.g. "wlp1s0")
    pub name: String,
    /// Object path of the interface on the bus
    pub path: OwnedObjectPath,
}

/// A network name (SSID) as the raw bytes a BSS advertises.
///
/// The bytes are kept as they are: two names are the same network only if
/// their bytes are equal. Names that are not valid UTF-8 are displayed in
/// wpa_supplicant's unquoted hex form.
///
/// # Example
///
/// ```
/// use wpars::Ssid;
///
/// assert_eq!(Ssid::from("Home").to_string(), "Home");
/// assert_eq!(Ssid::from(vec![0x43, 0xff]).to_string(), "43ff");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ssid(Vec<u8>);

impl Ssid {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The name as text, if the bytes are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Lowercase hex of the raw bytes, as wpa_supplicant writes
    /// non-printable names.
    pub fn to_hex(&self) -> String {
        self.0.iter().fold(String::with_capacity(self.0.len() * 2), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
    }

    /// Whether a configuration's `ssid` value names this network.
    ///
    /// A quoted value is compared as text. An unquoted value may be either
    /// text or the hex encoding of the bytes.
    pub(crate) fn matches_config(&self, configured: &str) -> bool {
        let quoted = configured.len() >= 2 && configured.starts_with('"') && configured.ends_with('"');
        if quoted {
            return self.as_str() == Some(&configured[1..configured.len() - 1]);
        }
        self.as_str() == Some(configured) || configured.eq_ignore_ascii_case(&self.to_hex())
    }

    /// The `ssid` value for `AddNetwork`.
    ///
    /// Text is sent as a string, which the daemon quotes. Other bytes are
    /// sent as a byte array, which the daemon stores as hex.
    pub(crate) fn to_prop_value(&self) -> PropValue {
        match self.as_str() {
            Some(text) => PropValue::from(text),
            None => PropValue::Bytes(self.0.clone()),
        }
    }
}

impl Display for Ssid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.as_str() {
            Some(text) => f.write_str(text),
            None => f.write_str(&self.to_hex()),
        }
    }
}

impl From<&str> for Ssid {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for Ssid {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&[u8]> for Ssid {
    fn from(b: &[u8]) -> Self {
        Self(b.to_vec())
    }
}

impl From<Vec<u8>> for Ssid {
    fn from(b: Vec<u8>) -> Self {
        Self(b)
    }
}

impl PartialEq<str> for Ssid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Ssid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

/// A network configuration object persisted by the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedNetwork {
    /// Object path of the configuration
    pub path: OwnedObjectPath,
    /// Network SSID with the daemon's surrounding quotes removed
    pub ssid: String,
    /// Whether the daemon may select this configuration
    pub enabled: bool,
}

/// Kind of scan to request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanType {
    /// Probe requests are sent on each channel.
    #[default]
    Active,
    /// Only listen for beacons.
    Passive,
}

impl ScanType {
    /// Wire representation used in the `Scan` argument mapping.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Passive => "passive",
        }
    }
}

impl Display for ScanType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScanType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "passive" => Ok(Self::Passive),
            other => Err(format!("unknown scan type '{other}'")),
        }
    }
}

/// Timeouts applied to bus operations.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wpars::TimeoutConfig;
///
/// let config = TimeoutConfig::new()
///     .with_method_timeout(Duration::from_millis(2500))
///     .with_scan_timeout(Duration::from_secs(10));
/// assert_eq!(config.method_timeout, Duration::from_millis(2500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Deadline for each method call and property read.
    pub method_timeout: Duration,
    /// How long to wait for `ScanDone` after requesting a scan.
    pub scan_timeout: Duration,
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method_timeout(mut self, timeout: Duration) -> Self {
        self.method_timeout = timeout;
        self
    }

    pub fn with_scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            method_timeout: timeouts::method_timeout(),
            scan_timeout: timeouts::scan_timeout(),
        }
    }
}

/// A step of the connection sequence that can fail the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStep {
    Select,
    Reassociate,
}

impl Display for ConnectStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Select => write!(f, "SelectNetwork"),
            Self::Reassociate => write!(f, "Reassociate"),
        }
    }
}

/// Result of driving an interface through disconnect, select and reassociate.
///
/// A failed `Disconnect` never decides the outcome, but it is kept in
/// `disconnect_error` so callers can tell "already disconnected" apart from
/// other causes.
#[derive(Debug)]
pub enum ConnectOutcome {
    /// `SelectNetwork` and `Reassociate` both succeeded.
    Associated { disconnect_error: Option<WpaError> },
    /// No configuration object was given; no calls were made.
    NoConfiguration,
    /// A required step failed and the attempt was abandoned.
    Failed {
        step: ConnectStep,
        error: WpaError,
        disconnect_error: Option<WpaError>,
    },
}

impl ConnectOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Associated { .. })
    }

    /// The tolerated `Disconnect` failure, if any.
    pub fn disconnect_error(&self) -> Option<&WpaError> {
        match self {
            Self::Associated { disconnect_error } | Self::Failed { disconnect_error, .. } => {
                disconnect_error.as_ref()
            }
            Self::NoConfiguration => None,
        }
    }
}

/// Result of one scan-and-connect run.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Networks presented to the user, deduplicated
    pub networks: Vec<Ssid>,
    /// Network the user picked
    pub selected: Ssid,
    /// Configuration object that was selected on the interface
    pub network: OwnedObjectPath,
    pub connect: ConnectOutcome,
}

/// Errors that can occur while talking to wpa_supplicant.
///
/// Transport failures are usually logged and turned into "no result" by the
/// component that hit them. Only [`WpaError::InterfaceUnavailable`] is meant
/// to end the process.
#[derive(Debug, Error)]
pub enum WpaError {
    /// A D-Bus communication error occurred.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// A bus operation did not complete in time.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// The interface could neither be found nor created.
    ///
    /// `source` is the error from the create attempt.
    #[error("interface '{ifname}' is unavailable: {source}")]
    InterfaceUnavailable {
        ifname: String,
        #[source]
        source: Box<WpaError>,
    },

    /// A dynamic value had a different type than expected.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// A property mapping lacked a required key.
    #[error("missing property '{0}'")]
    MissingProperty(String),

    /// Reading user input failed.
    #[error("input error: {0}")]
    Input(#[from] std::io::Error),

    /// The daemon reported an unsuccessful scan.
    #[error("scan failed")]
    ScanFailed,

    /// No scan completion arrived in time.
    #[error("no scan result after {0:?}")]
    ScanTimeout(Duration),

    /// The signal stream closed before the scan completed.
    #[error("signal stream ended")]
    SignalStreamEnded,

    /// The scan finished but no named network was visible.
    #[error("no networks found")]
    NoNetworks,

    /// Input closed before a valid network was selected.
    #[error("network selection aborted")]
    SelectionAborted,
}
