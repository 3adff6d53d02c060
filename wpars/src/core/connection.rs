//! Connection driver.
//!
//! Moves an interface onto a configuration with the
//! Disconnect -> SelectNetwork -> Reassociate sequence.

use log::{debug, error, info, warn};
use zvariant::OwnedObjectPath;

use crate::api::models::{ConnectOutcome, ConnectStep, Interface};
use crate::transport::SupplicantBus;
use crate::util::utils::is_no_object;

/// Connects `iface` using the configuration at `network`.
///
/// - The "no object" path fails immediately without any bus call.
/// - A failed `Disconnect` is logged and carried in the outcome, but does not
///   stop the sequence: the interface may simply not be associated.
/// - A failed `SelectNetwork` or `Reassociate` ends the attempt.
pub(crate) async fn connect<B>(
    bus: &B,
    iface: &Interface,
    network: &OwnedObjectPath,
) -> ConnectOutcome
where
    B: SupplicantBus + ?Sized,
{
    if is_no_object(network) {
        warn!("No network config to select on {}", iface.name);
        return ConnectOutcome::NoConfiguration;
    }

    let disconnect_error = match bus.disconnect(&iface.path).await {
        Ok(()) => {
            debug!("Disconnected {}", iface.name);
            None
        }
        Err(e) => {
            warn!(
                "Failed to disconnect {} (may already be disconnected): {e}",
                iface.name
            );
            Some(e)
        }
    };

    if let Err(error) = bus.select_network(&iface.path, network).await {
        error!(
            "Failed to select network {} on {}: {error}",
            network.as_str(),
            iface.name
        );
        return ConnectOutcome::Failed {
            step: ConnectStep::Select,
            error,
            disconnect_error,
        };
    }
    debug!("Selected network {}", network.as_str());

    if let Err(error) = bus.reassociate(&iface.path).await {
        error!("Failed to reassociate {}: {error}", iface.name);
        return ConnectOutcome::Failed {
            step: ConnectStep::Reassociate,
            error,
            disconnect_error,
        };
    }

    info!(
        "Reassociation requested on {} with {}",
        iface.name,
        network.as_str()
    );
    ConnectOutcome::Associated { disconnect_error }
}
