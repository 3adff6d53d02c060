//! Core orchestration logic.
//!
//! Each module implements one step of the scan-and-connect flow on top of
//! [`SupplicantBus`](crate::transport::SupplicantBus), so it can be driven by
//! the live transport or a fake one.

pub(crate) mod catalog;
pub(crate) mod connection;
pub(crate) mod interface;
pub(crate) mod network_config;
pub(crate) mod scan;
