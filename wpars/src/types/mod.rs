//! Type definitions and constants.
//!
//! This module contains wpa_supplicant constants and the dynamic value type
//! used for property mappings.

pub(crate) mod constants;
pub mod value;
