//! User input capability.

use std::io;

/// Source of the answers the connect flow needs from a user.
///
/// The flow calls these synchronously; a console implementation blocks
/// until a line is read. Scripted implementations make the flow testable
/// without a terminal.
pub trait Prompter {
    /// Presents `networks` and returns the raw 1-based choice.
    ///
    /// `None` means input is closed and the attempt should stop.
    fn choose(&mut self, networks: &[String]) -> io::Result<Option<String>>;

    /// Returns the passphrase for `ssid`.
    fn passphrase(&mut self, ssid: &str) -> io::Result<String>;

    /// Called when a choice was not a number in `1..=count`.
    fn invalid_choice(&mut self, _input: &str, _count: usize) {}
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn choose(&mut self, networks: &[String]) -> io::Result<Option<String>> {
        (**self).choose(networks)
    }

    fn passphrase(&mut self, ssid: &str) -> io::Result<String> {
        (**self).passphrase(ssid)
    }

    fn invalid_choice(&mut self, input: &str, count: usize) {
        (**self).invalid_choice(input, count)
    }
}
