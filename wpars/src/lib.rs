//! A Rust library for driving wpa_supplicant over D-Bus.
//!
//! This crate covers the control-plane flow of a simple Wi-Fi client:
//!
//! - Obtaining (or creating) a managed interface
//! - Triggering a scan and waiting for its completion signal
//! - Listing visible networks, one entry per SSID
//! - Reusing or creating a WPA-PSK network configuration
//! - Moving the interface onto that configuration
//!
//! # Example
//!
//! ```no_run
//! use wpars::{Prompter, ScanType, Supplicant};
//!
//! struct Fixed;
//!
//! impl Prompter for Fixed {
//!     fn choose(&mut self, _networks: &[String]) -> std::io::Result<Option<String>> {
//!         Ok(Some("1".into()))
//!     }
//!
//!     fn passphrase(&mut self, _ssid: &str) -> std::io::Result<String> {
//!         Ok("password123".into())
//!     }
//! }
//!
//! # async fn example() -> wpars::Result<()> {
//! let supplicant = Supplicant::new().await?;
//! let iface = supplicant.acquire_interface("wlan0").await?;
//!
//! let outcome = supplicant
//!     .scan_and_connect(&iface, ScanType::Active, &mut Fixed)
//!     .await?;
//! println!("{} -> {}", outcome.selected, outcome.connect.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return `Result<T, WpaError>`. Most transport
//! failures are logged and turned into a "no result" value by the
//! component that hit them; only interface acquisition is fatal.
//!
//! # Testing Without a Bus
//!
//! All components talk to the daemon through the [`SupplicantBus`] trait.
//! [`Supplicant::with_bus`] accepts any implementation, so the flow can run
//! against an in-memory fake.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`.

// Internal implementation modules
mod core;
mod dbus;
mod util;

// Public API modules
pub mod api;
pub mod transport;
pub mod types;

// Re-exported public API
pub use api::models::{
    ConnectOutcome, ConnectStep, Interface, SavedNetwork, ScanOutcome, ScanType, Ssid,
    TimeoutConfig, WpaError,
};
pub use api::prompt::Prompter;
pub use api::supplicant::Supplicant;
pub use transport::{DbusSupplicant, InterfaceEvent, SupplicantBus};
pub use types::constants::DEFAULT_IFNAME;
pub use types::value::{PropValue, PropertyMap};
pub use util::utils::{is_no_object, no_object, parse_selection};

/// A specialized `Result` type for wpa_supplicant operations.
pub type Result<T> = std::result::Result<T, WpaError>;
