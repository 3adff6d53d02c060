//! Live transport over the system bus.

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use log::{debug, warn};
use std::collections::HashMap;
use std::future::Future;
use tokio::time::timeout;
use zbus::Connection;
use zbus::proxy::CacheProperties;
use zvariant::{OwnedObjectPath, OwnedValue};

use crate::Result;
use crate::api::models::{TimeoutConfig, WpaError};
use crate::dbus::{BssProxy, InterfaceProxy, NetworkProxy, WpaSupplicantProxy};
use crate::transport::{InterfaceEvent, SupplicantBus};
use crate::types::constants::bus;
use crate::types::value::{PropertyMap, from_owned_map, to_value_map};

const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// [`SupplicantBus`] backed by a zbus connection.
///
/// Each operation, proxy construction included, runs under the configured
/// method timeout.
#[derive(Debug, Clone)]
pub struct DbusSupplicant {
    conn: Connection,
    timeouts: TimeoutConfig,
}

impl DbusSupplicant {
    /// Connects to the system bus.
    pub async fn system(timeouts: TimeoutConfig) -> Result<Self> {
        let conn = Connection::system().await?;
        Ok(Self { conn, timeouts })
    }

    /// Uses an existing connection.
    pub fn with_connection(conn: Connection, timeouts: TimeoutConfig) -> Self {
        Self { conn, timeouts }
    }

    pub fn timeout_config(&self) -> TimeoutConfig {
        self.timeouts
    }

    async fn timed<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = zbus::Result<T>>,
    {
        let limit = self.timeouts.method_timeout;
        match timeout(limit, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(WpaError::Timeout {
                operation,
                timeout: limit,
            }),
        }
    }

    async fn interface_proxy(&self, iface: &OwnedObjectPath) -> zbus::Result<InterfaceProxy<'static>> {
        InterfaceProxy::builder(&self.conn)
            .path(iface.clone())?
            .cache_properties(CacheProperties::No)
            .build()
            .await
    }
}

#[async_trait]
impl SupplicantBus for DbusSupplicant {
    async fn get_interface(&self, ifname: &str) -> Result<OwnedObjectPath> {
        self.timed("GetInterface", async {
            let root = WpaSupplicantProxy::new(&self.conn).await?;
            root.get_interface(ifname).await
        })
        .await
    }

    async fn create_interface(&self, args: &PropertyMap) -> Result<OwnedObjectPath> {
        self.timed("CreateInterface", async {
            let root = WpaSupplicantProxy::new(&self.conn).await?;
            root.create_interface(to_value_map(args)).await
        })
        .await
    }

    async fn scan(&self, iface: &OwnedObjectPath, args: &PropertyMap) -> Result<()> {
        self.timed("Scan", async {
            let proxy = self.interface_proxy(iface).await?;
            proxy.scan(to_value_map(args)).await
        })
        .await
    }

    async fn add_network(
        &self,
        iface: &OwnedObjectPath,
        args: &PropertyMap,
    ) -> Result<OwnedObjectPath> {
        self.timed("AddNetwork", async {
            let proxy = self.interface_proxy(iface).await?;
            proxy.add_network(to_value_map(args)).await
        })
        .await
    }

    async fn disconnect(&self, iface: &OwnedObjectPath) -> Result<()> {
        self.timed("Disconnect", async {
            let proxy = self.interface_proxy(iface).await?;
            proxy.disconnect().await
        })
        .await
    }

    async fn select_network(
        &self,
        iface: &OwnedObjectPath,
        network: &OwnedObjectPath,
    ) -> Result<()> {
        self.timed("SelectNetwork", async {
            let proxy = self.interface_proxy(iface).await?;
            proxy.select_network(network).await
        })
        .await
    }

    async fn reassociate(&self, iface: &OwnedObjectPath) -> Result<()> {
        self.timed("Reassociate", async {
            let proxy = self.interface_proxy(iface).await?;
            proxy.reassociate().await
        })
        .await
    }

    async fn bss_paths(&self, iface: &OwnedObjectPath) -> Result<Vec<OwnedObjectPath>> {
        self.timed("BSSs", async {
            let proxy = self.interface_proxy(iface).await?;
            proxy.bsss().await
        })
        .await
    }

    async fn network_paths(&self, iface: &OwnedObjectPath) -> Result<Vec<OwnedObjectPath>> {
        self.timed("Networks", async {
            let proxy = self.interface_proxy(iface).await?;
            proxy.networks().await
        })
        .await
    }

    async fn bss_ssid(&self, bss: &OwnedObjectPath) -> Result<Vec<u8>> {
        self.timed("SSID", async {
            let proxy = BssProxy::builder(&self.conn)
                .path(bss.clone())?
                .cache_properties(CacheProperties::No)
                .build()
                .await?;
            proxy.ssid().await
        })
        .await
    }

    async fn network_all_properties(&self, network: &OwnedObjectPath) -> Result<PropertyMap> {
        let all: HashMap<String, OwnedValue> = self
            .timed("GetAll", async {
                let proxy: zbus::Proxy<'_> = zbus::proxy::Builder::new(&self.conn)
                    .destination(bus::SERVICE)?
                    .path(network.clone())?
                    .interface(PROPERTIES_INTERFACE)?
                    .cache_properties(CacheProperties::No)
                    .build()
                    .await?;

                let reply = proxy.call_method("GetAll", &(bus::NETWORK,)).await?;
                reply.body().deserialize()
            })
            .await?;

        from_owned_map(&all)
    }

    async fn network_enabled(&self, network: &OwnedObjectPath) -> Result<bool> {
        self.timed("Enabled", async {
            let proxy = NetworkProxy::builder(&self.conn)
                .path(network.clone())?
                .cache_properties(CacheProperties::No)
                .build()
                .await?;
            proxy.enabled().await
        })
        .await
    }

    async fn interface_events(
        &self,
        iface: &OwnedObjectPath,
    ) -> Result<BoxStream<'static, InterfaceEvent>> {
        let (bss_added, scan_done) = self
            .timed("subscribe", async {
                let proxy = self.interface_proxy(iface).await?;
                let bss_added = proxy.receive_bss_added().await?;
                let scan_done = proxy.receive_scan_done().await?;
                Ok((bss_added, scan_done))
            })
            .await?;
        debug!("Subscribed to BSSAdded and ScanDone on {}", iface.as_str());

        let bss_added = bss_added.filter_map(|signal| async move {
            let args = match signal.args() {
                Ok(args) => args,
                Err(e) => {
                    warn!("Failed to parse BSSAdded signal args: {e}");
                    return None;
                }
            };
            match from_owned_map(&args.properties) {
                Ok(properties) => Some(InterfaceEvent::BssAdded {
                    path: args.path.clone(),
                    properties,
                }),
                Err(e) => {
                    warn!("Unreadable BSSAdded properties for {}: {e}", args.path.as_str());
                    None
                }
            }
        });

        let scan_done = scan_done.filter_map(|signal| async move {
            match signal.args() {
                Ok(args) => Some(InterfaceEvent::ScanDone {
                    success: args.success,
                }),
                Err(e) => {
                    warn!("Failed to parse ScanDone signal args: {e}");
                    None
                }
            }
        });

        Ok(stream::select(bss_added, scan_done).boxed())
    }
}
