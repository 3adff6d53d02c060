//! The bus seam between orchestration logic and wpa_supplicant.
//!
//! Everything the components need from the daemon goes through
//! [`SupplicantBus`]. [`DbusSupplicant`] is the live implementation over the
//! system bus; tests provide scripted fakes.

mod dbus;

use async_trait::async_trait;
use futures::stream::BoxStream;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::types::value::PropertyMap;

pub use dbus::DbusSupplicant;

/// An asynchronous notification emitted by a managed interface.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceEvent {
    /// A BSS was discovered. `properties` is the daemon's initial snapshot.
    BssAdded {
        path: OwnedObjectPath,
        properties: PropertyMap,
    },
    /// A scan finished.
    ScanDone { success: bool },
}

/// Remote operations offered by wpa_supplicant.
///
/// Object references are passed as object paths. Implementations apply
/// their own per-operation deadlines; every call either completes or fails
/// with an error, nothing is retried here.
#[async_trait]
pub trait SupplicantBus: Send + Sync {
    /// `GetInterface(ifname)` on the root object.
    async fn get_interface(&self, ifname: &str) -> Result<OwnedObjectPath>;

    /// `CreateInterface(args)` on the root object.
    async fn create_interface(&self, args: &PropertyMap) -> Result<OwnedObjectPath>;

    /// `Scan(args)`. Returns once the request is accepted, not when it completes.
    async fn scan(&self, iface: &OwnedObjectPath, args: &PropertyMap) -> Result<()>;

    /// `AddNetwork(args)`.
    async fn add_network(
        &self,
        iface: &OwnedObjectPath,
        args: &PropertyMap,
    ) -> Result<OwnedObjectPath>;

    /// `Disconnect()`.
    async fn disconnect(&self, iface: &OwnedObjectPath) -> Result<()>;

    /// `SelectNetwork(network)`.
    async fn select_network(
        &self,
        iface: &OwnedObjectPath,
        network: &OwnedObjectPath,
    ) -> Result<()>;

    /// `Reassociate()`.
    async fn reassociate(&self, iface: &OwnedObjectPath) -> Result<()>;

    /// The interface's `BSSs` property.
    async fn bss_paths(&self, iface: &OwnedObjectPath) -> Result<Vec<OwnedObjectPath>>;

    /// The interface's `Networks` property.
    async fn network_paths(&self, iface: &OwnedObjectPath) -> Result<Vec<OwnedObjectPath>>;

    /// The raw `SSID` bytes of a BSS.
    async fn bss_ssid(&self, bss: &OwnedObjectPath) -> Result<Vec<u8>>;

    /// Every property of a network object, read generically.
    ///
    /// The configuration table is the nested mapping under `Properties`.
    async fn network_all_properties(&self, network: &OwnedObjectPath) -> Result<PropertyMap>;

    /// The typed `Enabled` property of a network object.
    async fn network_enabled(&self, network: &OwnedObjectPath) -> Result<bool>;

    /// Subscribes to `BSSAdded` and `ScanDone` on the interface.
    ///
    /// The subscription is live when this returns, so a scan requested
    /// afterwards cannot complete unseen.
    async fn interface_events(
        &self,
        iface: &OwnedObjectPath,
    ) -> Result<BoxStream<'static, InterfaceEvent>>;
}
