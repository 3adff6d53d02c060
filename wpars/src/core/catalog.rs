//! Visible network catalog.
//!
//! Reads the BSS table of the last scan and reduces it to one entry per
//! network name. Names are compared byte for byte.

use log::debug;
use std::collections::HashSet;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{Interface, Ssid};
use crate::transport::SupplicantBus;
use crate::try_log;
use crate::types::constants::keys;
use crate::types::value::PropertyMap;

/// Lists the names of the networks in the interface's current BSS table.
///
/// Names are returned once each, in the order their first BSS appears.
/// Hidden networks (empty SSID) are skipped, as are BSSs that disappear
/// before their SSID can be read.
pub(crate) async fn list_visible_networks<B>(bus: &B, iface: &Interface) -> Result<Vec<Ssid>>
where
    B: SupplicantBus + ?Sized,
{
    let bss_paths = bus.bss_paths(&iface.path).await?;
    debug!("{} BSS entries on {}", bss_paths.len(), iface.name);

    let mut seen = HashSet::new();
    let mut ssids = Vec::new();

    for path in bss_paths {
        let Some(ssid) = read_ssid(bus, &path).await else {
            continue;
        };

        if ssid.is_empty() {
            debug!("Skipping hidden BSS {}", path.as_str());
            continue;
        }

        if seen.insert(ssid.clone()) {
            ssids.push(ssid);
        }
    }

    Ok(ssids)
}

async fn read_ssid<B>(bus: &B, path: &OwnedObjectPath) -> Option<Ssid>
where
    B: SupplicantBus + ?Sized,
{
    let bytes = try_log!(
        bus.bss_ssid(path).await,
        format!("Failed to read SSID of {}", path.as_str())
    );
    Some(Ssid::from(bytes))
}

/// Extracts the decoded SSID from a `BSSAdded` property snapshot.
pub(crate) fn ssid_from_properties(properties: &PropertyMap) -> Option<Ssid> {
    let raw = properties.get(keys::BSS_SSID)?.as_bytes().ok()?;
    Some(Ssid::from(raw))
}
