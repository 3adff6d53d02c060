//! Console input provider.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use wpars::Prompter;

/// Prompts on a terminal, or on any reader/writer pair.
///
/// Each answer is one line of input. End of input while choosing a network
/// means the user gave up.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Reads one line without its line terminator. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn choose(&mut self, networks: &[String]) -> io::Result<Option<String>> {
        writeln!(self.output, "List of SSIDs detected:")?;
        for (i, ssid) in networks.iter().enumerate() {
            writeln!(self.output, "{}: {ssid}", i + 1)?;
        }
        writeln!(self.output, "Select an SSID (enter number):")?;
        self.output.flush()?;

        // blank lines are not an answer
        while let Some(line) = self.read_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn passphrase(&mut self, ssid: &str) -> io::Result<String> {
        writeln!(self.output, "({ssid}): enter password:")?;
        self.output.flush()?;

        self.read_line()?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input closed before password")
        })
    }

    fn invalid_choice(&mut self, input: &str, count: usize) {
        let _ = writeln!(
            self.output,
            "Invalid selection '{input}', enter a number between 1 and {count}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> ConsolePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: &ConsolePrompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output.clone()).unwrap()
    }

    #[test]
    fn choose_lists_networks_numbered_from_one() {
        let mut p = prompter("2\n");
        let networks = vec!["Cafe".to_string(), "Home".to_string()];

        assert_eq!(p.choose(&networks).unwrap().as_deref(), Some("2"));
        assert_eq!(
            output(&p),
            "List of SSIDs detected:\n1: Cafe\n2: Home\nSelect an SSID (enter number):\n"
        );
    }

    #[test]
    fn choose_skips_blank_lines() {
        let mut p = prompter("\n  \n1\r\n");
        assert_eq!(
            p.choose(&["Cafe".to_string()]).unwrap().as_deref(),
            Some("1")
        );
    }

    #[test]
    fn choose_returns_none_at_end_of_input() {
        let mut p = prompter("");
        assert_eq!(p.choose(&["Cafe".to_string()]).unwrap(), None);

        let mut p = prompter("\n\n");
        assert_eq!(p.choose(&["Cafe".to_string()]).unwrap(), None);
    }

    #[test]
    fn passphrase_keeps_inner_spaces() {
        let mut p = prompter("correct horse battery\n");
        assert_eq!(p.passphrase("Home").unwrap(), "correct horse battery");
        assert_eq!(output(&p), "(Home): enter password:\n");
    }

    #[test]
    fn passphrase_fails_at_end_of_input() {
        let mut p = prompter("");
        let err = p.passphrase("Home").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn invalid_choice_names_the_range() {
        let mut p = prompter("");
        p.invalid_choice("7", 2);
        assert_eq!(
            output(&p),
            "Invalid selection '7', enter a number between 1 and 2\n"
        );
    }
}
