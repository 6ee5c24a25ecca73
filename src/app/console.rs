use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use crossterm::style::Stylize;

pub(crate) struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}").context("failed to write to terminal")
    }

    pub(crate) fn error(&mut self, line: &str) -> Result<()> {
        self.say(line.red())
    }

    pub(crate) fn success(&mut self, line: &str) -> Result<()> {
        self.say(line.green())
    }

    pub(crate) fn heading(&mut self, line: &str) -> Result<()> {
        self.say(line.cyan().bold())
    }

    /// Show `prompt` and read one line with the line ending stripped. Bytes
    /// that are not UTF-8 come back as U+FFFD. `None` means standard input is closed.
    pub(crate) fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt.yellow()).context("failed to write to terminal")?;
        self.output.flush().context("failed to flush terminal")?;

        let mut raw = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut raw)
            .context("failed to read from terminal")?;
        if read == 0 {
            writeln!(self.output).context("failed to write to terminal")?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    pub(crate) fn ask_keyword(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self.ask(prompt)?.map(|answer| normalize(&answer)))
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}

pub(crate) fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
