//! D-Bus proxy interfaces for wpa_supplicant.
//!
//! This module contains low-level D-Bus proxy definitions for communicating
//! with wpa_supplicant over the system bus.
//!
//! # Object Structure
//!
//! - `/fi/w1/wpa_supplicant1` - Root object
//! - `/fi/w1/wpa_supplicant1/Interfaces/N` - Managed interfaces
//! - `/fi/w1/wpa_supplicant1/Interfaces/N/BSSs/M` - Scan results
//! - `/fi/w1/wpa_supplicant1/Interfaces/N/Networks/M` - Network configurations

mod bss;
mod interface;
mod network;
mod wpa_supplicant;

pub(crate) use bss::BssProxy;
pub(crate) use interface::InterfaceProxy;
pub(crate) use network::NetworkProxy;
pub(crate) use wpa_supplicant::WpaSupplicantProxy;
