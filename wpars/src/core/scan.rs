//! Scan orchestration.
//!
//! Triggers a scan and continues the flow from the interface's signal
//! stream: `ScanDone(true)` leads to the catalog, the user's choice,
//! configuration resolution and finally the connection driver. One scan
//! drives at most one connection attempt; nothing is retried.

use futures::{Stream, StreamExt};
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::timeout;

use crate::Result;
use crate::api::models::{Interface, ScanOutcome, ScanType, Ssid, WpaError};
use crate::api::prompt::Prompter;
use crate::core::catalog::{list_visible_networks, ssid_from_properties};
use crate::core::connection::connect;
use crate::core::network_config::resolve_network;
use crate::transport::{InterfaceEvent, SupplicantBus};
use crate::types::constants::keys;
use crate::types::value::PropertyMap;
use crate::util::utils::parse_selection;

/// Requests a scan without waiting for it to finish.
pub(crate) async fn start_scan<B>(bus: &B, iface: &Interface, scan_type: ScanType) -> Result<()>
where
    B: SupplicantBus + ?Sized,
{
    info!("Starting {scan_type} scan on {}", iface.name);

    let mut args = PropertyMap::new();
    args.insert(keys::SCAN_TYPE.into(), scan_type.as_str().into());

    bus.scan(&iface.path, &args).await
}

/// Consumes interface events until the scan completes.
///
/// `BSSAdded` events are only logged. Returns `ScanFailed` when the daemon
/// reports an unsuccessful scan and `ScanTimeout` when nothing arrives in
/// time.
pub(crate) async fn wait_for_scan_done<S>(events: &mut S, limit: Duration) -> Result<()>
where
    S: Stream<Item = InterfaceEvent> + Unpin,
{
    let result = timeout(limit, async {
        while let Some(event) = events.next().await {
            match event {
                InterfaceEvent::BssAdded { path, properties } => {
                    match ssid_from_properties(&properties) {
                        Some(ssid) => debug!("BSSAdded: '{ssid}' at {}", path.as_str()),
                        None => debug!("BSSAdded: {}", path.as_str()),
                    }
                }
                InterfaceEvent::ScanDone { success } => {
                    info!("ScanDone: {success}");
                    return if success {
                        Ok(())
                    } else {
                        Err(WpaError::ScanFailed)
                    };
                }
            }
        }
        Err(WpaError::SignalStreamEnded)
    })
    .await;

    match result {
        Ok(inner) => inner,
        Err(_) => {
            warn!("No ScanDone after {limit:?}");
            Err(WpaError::ScanTimeout(limit))
        }
    }
}

/// Scans and returns the deduplicated list of visible networks.
///
/// The signal subscription is made before the scan is requested.
pub(crate) async fn scan_and_list<B>(
    bus: &B,
    iface: &Interface,
    scan_type: ScanType,
    scan_timeout: Duration,
) -> Result<Vec<Ssid>>
where
    B: SupplicantBus + ?Sized,
{
    let mut events = bus.interface_events(&iface.path).await?;
    start_scan(bus, iface, scan_type).await?;
    wait_for_scan_done(&mut events, scan_timeout).await?;

    list_visible_networks(bus, iface).await
}

/// Asks the prompter to pick one of `networks`.
///
/// Invalid answers are reported back and asked again. Returns
/// `SelectionAborted` once the prompter has no more input.
pub(crate) fn choose_network<P>(prompter: &mut P, networks: &[Ssid]) -> Result<Ssid>
where
    P: Prompter + ?Sized,
{
    let labels: Vec<String> = networks.iter().map(Ssid::to_string).collect();

    loop {
        let Some(raw) = prompter.choose(&labels)? else {
            return Err(WpaError::SelectionAborted);
        };

        match parse_selection(&raw, networks.len()) {
            Some(index) => return Ok(networks[index].clone()),
            None => {
                warn!("Invalid selection '{}'", raw.trim());
                prompter.invalid_choice(raw.trim(), networks.len());
            }
        }
    }
}

/// Runs the full flow: scan, present, resolve, connect.
pub(crate) async fn scan_and_connect<B, P>(
    bus: &B,
    iface: &Interface,
    scan_type: ScanType,
    scan_timeout: Duration,
    prompter: &mut P,
) -> Result<ScanOutcome>
where
    B: SupplicantBus + ?Sized,
    P: Prompter + ?Sized,
{
    let networks = scan_and_list(bus, iface, scan_type, scan_timeout).await?;
    if networks.is_empty() {
        return Err(WpaError::NoNetworks);
    }

    let selected = choose_network(prompter, &networks)?;
    info!("Selected '{selected}'");

    let network = resolve_network(bus, iface, &selected, prompter).await;
    let connect = connect(bus, iface, &network).await;

    Ok(ScanOutcome {
        networks,
        selected,
        network,
        connect,
    })
}
