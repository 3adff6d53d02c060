//! Interface acquisition.

use log::{error, info, warn};

use crate::Result;
use crate::api::models::{Interface, WpaError};
use crate::transport::SupplicantBus;
use crate::types::constants::keys;
use crate::types::value::PropertyMap;

/// Returns a handle to the managed interface `ifname`.
///
/// Looks the interface up first and asks the daemon to create it if that
/// fails. Creation persists on the daemon across runs. If both calls fail
/// the interface is unavailable and the caller should give up.
pub(crate) async fn acquire_interface<B>(bus: &B, ifname: &str) -> Result<Interface>
where
    B: SupplicantBus + ?Sized,
{
    match bus.get_interface(ifname).await {
        Ok(path) => {
            info!("Using interface {ifname} at {}", path.as_str());
            return Ok(Interface {
                name: ifname.to_string(),
                path,
            });
        }
        Err(e) => warn!("Error in getting interface {ifname}: {e}"),
    }

    let mut args = PropertyMap::new();
    args.insert(keys::IFNAME.into(), ifname.into());

    match bus.create_interface(&args).await {
        Ok(path) => {
            info!("Created interface {ifname} at {}", path.as_str());
            Ok(Interface {
                name: ifname.to_string(),
                path,
            })
        }
        Err(e) => {
            error!("Failed to create interface {ifname}: {e}");
            Err(WpaError::InterfaceUnavailable {
                ifname: ifname.to_string(),
                source: Box::new(e),
            })
        }
    }
}
