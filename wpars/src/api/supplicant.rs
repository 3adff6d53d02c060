use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{
    ConnectOutcome, Interface, SavedNetwork, ScanOutcome, ScanType, Ssid, TimeoutConfig,
};
use crate::api::prompt::Prompter;
use crate::core::catalog::list_visible_networks;
use crate::core::connection::connect;
use crate::core::interface::acquire_interface;
use crate::core::network_config::{
    create_network, find_existing, list_saved_networks, resolve_network,
};
use crate::core::scan::{scan_and_connect, scan_and_list, start_scan};
use crate::transport::{DbusSupplicant, SupplicantBus};

/// High-level interface to wpa_supplicant.
///
/// This is the main entry point. It wraps a [`SupplicantBus`], by default the
/// live [`DbusSupplicant`] on the system bus.
///
/// # Example
///
/// ```no_run
/// use wpars::{ScanType, Supplicant};
///
/// # async fn example() -> wpars::Result<()> {
/// let supplicant = Supplicant::new().await?;
/// let iface = supplicant.acquire_interface("wlan0").await?;
///
/// for ssid in supplicant.scan_and_list(&iface, ScanType::Active).await? {
///     println!("{ssid}");
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Failure Policy
///
/// Only [`acquire_interface`](Self::acquire_interface) treats a transport
/// failure as fatal. Lookups return the "no object" path and connection
/// attempts report a [`ConnectOutcome`] instead of an error.
#[derive(Debug, Clone)]
pub struct Supplicant<B = DbusSupplicant> {
    bus: B,
    config: TimeoutConfig,
}

impl Supplicant<DbusSupplicant> {
    /// Creates a `Supplicant` connected to the system D-Bus.
    pub async fn new() -> Result<Self> {
        Self::with_config(TimeoutConfig::default()).await
    }

    /// Creates a `Supplicant` connected to the system D-Bus with custom timeouts.
    pub async fn with_config(config: TimeoutConfig) -> Result<Self> {
        let bus = DbusSupplicant::system(config).await?;
        Ok(Self { bus, config })
    }
}

impl<B: SupplicantBus> Supplicant<B> {
    /// Wraps any transport, using default timeouts.
    pub fn with_bus(bus: B) -> Self {
        Self {
            bus,
            config: TimeoutConfig::default(),
        }
    }

    /// Replaces the timeout configuration used by the orchestration.
    pub fn with_timeouts(mut self, config: TimeoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn timeout_config(&self) -> TimeoutConfig {
        self.config
    }

    /// Gets the managed interface `ifname`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `WpaError::InterfaceUnavailable` if the interface can be
    /// neither found nor created.
    pub async fn acquire_interface(&self, ifname: &str) -> Result<Interface> {
        acquire_interface(&self.bus, ifname).await
    }

    /// Requests a scan without waiting for it.
    pub async fn start_scan(&self, iface: &Interface, scan_type: ScanType) -> Result<()> {
        start_scan(&self.bus, iface, scan_type).await
    }

    /// Lists network names from the current scan results, deduplicated in
    /// first-seen order.
    pub async fn list_visible_networks(&self, iface: &Interface) -> Result<Vec<Ssid>> {
        list_visible_networks(&self.bus, iface).await
    }

    /// Lists the configuration objects on the interface.
    pub async fn list_saved_networks(&self, iface: &Interface) -> Result<Vec<SavedNetwork>> {
        list_saved_networks(&self.bus, iface).await
    }

    /// Returns the first configuration matching `ssid`, or the "no object" path.
    pub async fn find_existing(&self, iface: &Interface, ssid: &Ssid) -> OwnedObjectPath {
        find_existing(&self.bus, iface, ssid).await
    }

    /// Adds a WPA-PSK configuration for `ssid`, asking `prompter` for the
    /// passphrase. Returns the "no object" path on failure.
    pub async fn create_network<P: Prompter + ?Sized>(
        &self,
        iface: &Interface,
        ssid: &Ssid,
        prompter: &mut P,
    ) -> OwnedObjectPath {
        create_network(&self.bus, iface, ssid, prompter).await
    }

    /// Finds or creates the configuration for `ssid`.
    pub async fn resolve_network<P: Prompter + ?Sized>(
        &self,
        iface: &Interface,
        ssid: &Ssid,
        prompter: &mut P,
    ) -> OwnedObjectPath {
        resolve_network(&self.bus, iface, ssid, prompter).await
    }

    /// Runs Disconnect, SelectNetwork and Reassociate for `network`.
    pub async fn connect(&self, iface: &Interface, network: &OwnedObjectPath) -> ConnectOutcome {
        connect(&self.bus, iface, network).await
    }

    /// Scans and returns the visible networks once the scan completes.
    pub async fn scan_and_list(&self, iface: &Interface, scan_type: ScanType) -> Result<Vec<Ssid>> {
        scan_and_list(&self.bus, iface, scan_type, self.config.scan_timeout).await
    }

    /// Scans, lets `prompter` pick a network, and connects to it.
    ///
    /// # Errors
    ///
    /// Fails when the scan fails or times out, when no network is visible,
    /// or when the prompter closes before a valid choice. The connection
    /// attempt itself is reported in [`ScanOutcome::connect`].
    pub async fn scan_and_connect<P: Prompter + ?Sized>(
        &self,
        iface: &Interface,
        scan_type: ScanType,
        prompter: &mut P,
    ) -> Result<ScanOutcome> {
        scan_and_connect(&self.bus, iface, scan_type, self.config.scan_timeout, prompter).await
    }
}
