//! Tests for the Disconnect -> SelectNetwork -> Reassociate sequence.

mod common;

use common::{Call, FakeBus, iface, network_path};
use wpars::{ConnectOutcome, ConnectStep, Supplicant, no_object};

#[tokio::test]
async fn no_object_fails_without_bus_calls() {
    let supplicant = Supplicant::with_bus(FakeBus::new());

    let outcome = supplicant.connect(&iface(), &no_object()).await;

    assert!(matches!(outcome, ConnectOutcome::NoConfiguration));
    assert!(!outcome.is_success());
    assert!(supplicant.bus().calls().is_empty());
}

#[tokio::test]
async fn runs_all_steps_in_order() {
    let supplicant = Supplicant::with_bus(FakeBus::new());

    let outcome = supplicant.connect(&iface(), &network_path(4)).await;

    assert!(outcome.is_success());
    assert!(outcome.disconnect_error().is_none());
    assert_eq!(
        supplicant.bus().calls(),
        vec![
            Call::Disconnect,
            Call::SelectNetwork(network_path(4)),
            Call::Reassociate,
        ]
    );
}

#[tokio::test]
async fn disconnect_failure_is_tolerated_but_reported() {
    let supplicant = Supplicant::with_bus(FakeBus::new().failing("Disconnect"));

    let outcome = supplicant.connect(&iface(), &network_path(4)).await;

    assert!(outcome.is_success());
    assert!(outcome.disconnect_error().is_some());
    assert_eq!(
        supplicant.bus().calls(),
        vec![
            Call::Disconnect,
            Call::SelectNetwork(network_path(4)),
            Call::Reassociate,
        ]
    );
}

#[tokio::test]
async fn select_failure_stops_before_reassociate() {
    let supplicant = Supplicant::with_bus(FakeBus::new().failing("SelectNetwork"));

    let outcome = supplicant.connect(&iface(), &network_path(4)).await;

    assert!(!outcome.is_success());
    assert!(matches!(
        outcome,
        ConnectOutcome::Failed {
            step: ConnectStep::Select,
            ..
        }
    ));
    assert!(!supplicant.bus().calls().contains(&Call::Reassociate));
}

#[tokio::test]
async fn reassociate_failure_fails_attempt() {
    let supplicant = Supplicant::with_bus(
        FakeBus::new()
            .failing("Disconnect")
            .failing("Reassociate"),
    );

    let outcome = supplicant.connect(&iface(), &network_path(4)).await;

    match outcome {
        ConnectOutcome::Failed {
            step,
            disconnect_error,
            ..
        } => {
            assert_eq!(step, ConnectStep::Reassociate);
            assert!(disconnect_error.is_some());
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
