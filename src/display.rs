//! Terminal display used in interactive mode.

use std::{
    fmt,
    io::{self, BufRead, BufReader, Stdin, Stdout, Write},
};

use anyhow::{bail, Context};
use tracing::warn;

use crate::game_interface::Display;

/// Prints each snapshot with its `Display` implementation and waits for Enter.
pub struct ConsoleDisplay<R, W> {
    input: R,
    output: W,
}

impl ConsoleDisplay<BufReader<Stdin>, Stdout> {
    /// Display on the terminal.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleDisplay<R, W> {
    /// Display on `output`, reading acknowledgements from `input`.
    pub fn new(input: R, output: W) -> Self {
        ConsoleDisplay { input, output }
    }

    /// Give the output back.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<S: fmt::Display, R: BufRead, W: Write> Display<S> for ConsoleDisplay<R, W> {
    fn render(&mut self, snapshot: &S) {
        // clear screen, cursor home
        let res = writeln!(self.output, "\x1b[2J\x1b[H{snapshot}").and_then(|()| self.output.flush());
        if let Err(e) = res {
            warn!("could not render step: {e}");
        }
    }

    fn show_fault(&mut self, message: &str) {
        // red message
        if let Err(e) = writeln!(self.output, "\x1b[31m{message}\x1b[39m") {
            warn!("could not show fault: {e}");
        }
    }

    fn wait_for_ack(&mut self) -> anyhow::Result<()> {
        write!(self.output, "Press Enter for next step...")
            .and_then(|()| self.output.flush())
            .context("could not prompt for acknowledgement")?;
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("could not read acknowledgement")?;
        if n == 0 {
            bail!("input closed while waiting for acknowledgement");
        }
        Ok(())
    }
}
