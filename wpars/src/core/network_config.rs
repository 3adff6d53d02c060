//! Network configuration lookup and creation.
//!
//! A target SSID is resolved to a configuration object on the interface,
//! reusing an existing one when its `ssid` matches and otherwise adding a
//! new WPA-PSK configuration with a passphrase from the [`Prompter`].

use log::{debug, error, info, warn};
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{Interface, SavedNetwork, Ssid, WpaError};
use crate::api::prompt::Prompter;
use crate::transport::SupplicantBus;
use crate::types::constants::{key_mgmt, keys};
use crate::types::value::PropertyMap;
use crate::util::utils::{is_no_object, no_object, strip_quotes};

/// Reads the configured `ssid` value of a network object, as stored.
///
/// The configuration table is a nested `a{sv}` and has to come through the
/// generic all-properties read, then be unpacked from `Properties`.
pub(crate) async fn read_network_ssid<B>(bus: &B, network: &OwnedObjectPath) -> Result<String>
where
    B: SupplicantBus + ?Sized,
{
    let all = bus.network_all_properties(network).await?;
    configured_ssid(&all).map(str::to_string)
}

/// The `ssid` entry of the `Properties` table, quotes included.
fn configured_ssid(all: &PropertyMap) -> Result<&str> {
    all.get(keys::PROPERTIES)
        .ok_or_else(|| WpaError::MissingProperty(keys::PROPERTIES.into()))?
        .as_map()?
        .get(keys::SSID)
        .ok_or_else(|| WpaError::MissingProperty(keys::SSID.into()))?
        .as_str()
}

fn ssid_of(all: &PropertyMap) -> Result<String> {
    configured_ssid(all).map(|ssid| strip_quotes(ssid).to_string())
}

/// Lists every configuration object on the interface.
///
/// Objects that cannot be read are skipped with a warning.
pub(crate) async fn list_saved_networks<B>(bus: &B, iface: &Interface) -> Result<Vec<SavedNetwork>>
where
    B: SupplicantBus + ?Sized,
{
    let paths = bus.network_paths(&iface.path).await?;
    let mut saved = Vec::with_capacity(paths.len());

    for path in paths {
        let all = match bus.network_all_properties(&path).await {
            Ok(all) => all,
            Err(e) => {
                warn!("Skipping network {}: {e}", path.as_str());
                continue;
            }
        };

        let ssid = match ssid_of(&all) {
            Ok(ssid) => ssid,
            Err(e) => {
                warn!("Skipping network {}: {e}", path.as_str());
                continue;
            }
        };

        let enabled = match all.get(keys::ENABLED).map(|v| v.as_bool()) {
            Some(Ok(enabled)) => enabled,
            Some(Err(e)) => {
                warn!("Unexpected Enabled value on {}: {e}", path.as_str());
                false
            }
            None => bus.network_enabled(&path).await.unwrap_or_else(|e| {
                warn!("Failed to read Enabled on {}: {e}", path.as_str());
                false
            }),
        };

        saved.push(SavedNetwork {
            path,
            ssid,
            enabled,
        });
    }

    Ok(saved)
}

/// Finds the configuration whose `ssid` names `ssid` exactly.
///
/// Returns the first match, or the "no object" path when nothing matches or
/// the configuration list cannot be read.
pub(crate) async fn find_existing<B>(bus: &B, iface: &Interface, ssid: &Ssid) -> OwnedObjectPath
where
    B: SupplicantBus + ?Sized,
{
    let paths = match bus.network_paths(&iface.path).await {
        Ok(paths) => paths,
        Err(e) => {
            warn!("Failed to list networks on {}: {e}", iface.name);
            return no_object();
        }
    };

    for path in paths {
        debug!("Network: {}", path.as_str());

        let network_ssid = match read_network_ssid(bus, &path).await {
            Ok(s) => s,
            Err(e) => {
                warn!("Skipping network {}: {e}", path.as_str());
                continue;
            }
        };

        debug!("network ssid: {network_ssid}, desired ssid: {ssid}");

        if ssid.matches_config(&network_ssid) {
            info!("Found network config for '{ssid}' at {}", path.as_str());
            return path;
        }
    }

    no_object()
}

/// Builds the `AddNetwork` arguments for a WPA-PSK network.
pub(crate) fn psk_network_args(ssid: &Ssid, psk: &str) -> PropertyMap {
    let mut args = PropertyMap::new();
    args.insert(keys::SSID.into(), ssid.to_prop_value());
    args.insert(keys::KEY_MGMT.into(), key_mgmt::WPA_PSK.into());
    args.insert(keys::PSK.into(), psk.into());
    args
}

/// Prompts for a passphrase and adds a WPA-PSK configuration for `ssid`.
///
/// Returns the "no object" path if the prompt or the `AddNetwork` call
/// fails. Nothing is retried.
pub(crate) async fn create_network<B, P>(
    bus: &B,
    iface: &Interface,
    ssid: &Ssid,
    prompter: &mut P,
) -> OwnedObjectPath
where
    B: SupplicantBus + ?Sized,
    P: Prompter + ?Sized,
{
    let psk = match prompter.passphrase(&ssid.to_string()) {
        Ok(psk) => psk,
        Err(e) => {
            error!("Failed to read passphrase for '{ssid}': {e}");
            return no_object();
        }
    };

    match bus
        .add_network(&iface.path, &psk_network_args(ssid, &psk))
        .await
    {
        Ok(path) => {
            info!("Created network config for '{ssid}' at {}", path.as_str());
            path
        }
        Err(e) => {
            error!("Error in creating network config for '{ssid}': {e}");
            no_object()
        }
    }
}

/// Resolves `ssid` to a configuration, preferring an existing one.
///
/// The prompter is asked for a passphrase at most once, and only when no
/// existing configuration matches.
pub(crate) async fn resolve_network<B, P>(
    bus: &B,
    iface: &Interface,
    ssid: &Ssid,
    prompter: &mut P,
) -> OwnedObjectPath
where
    B: SupplicantBus + ?Sized,
    P: Prompter + ?Sized,
{
    let existing = find_existing(bus, iface, ssid).await;
    if !is_no_object(&existing) {
        return existing;
    }

    info!("No network config for '{ssid}', creating one");
    let created = create_network(bus, iface, ssid, prompter).await;
    if is_no_object(&created) {
        warn!("Unable to find or create a network config for '{ssid}'");
    }
    created
}
