//! Utility functions for configuration values and object references.

use zvariant::{ObjectPath, OwnedObjectPath};

use crate::types::constants::bus;

/// Removes the double quotes wpa_supplicant puts around string-literal
/// configuration values (`"home"` becomes `home`).
pub(crate) fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

/// Parses a 1-based menu choice into an index into a list of `len` items.
pub fn parse_selection(input: &str, len: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// The reference the daemon uses for "no object".
pub fn no_object() -> OwnedObjectPath {
    OwnedObjectPath::from(ObjectPath::from_static_str_unchecked(bus::NO_OBJECT))
}

/// Whether `path` is the "no object" reference.
pub fn is_no_object(path: &OwnedObjectPath) -> bool {
    path.as_str() == bus::NO_OBJECT
}

/// Macro to convert Result to Option with error logging.
/// Usage: `try_log!(result, "context message")`
#[macro_export]
macro_rules! try_log {
    ($result:expr, $context:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}: {}", $context, e);
                return None;
            }
        }
    };
}
