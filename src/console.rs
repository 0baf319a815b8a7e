//! Line-oriented console used for every prompt and report.

use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, StdinLock, StdoutLock, Write};
use std::str::FromStr;
use tracing::debug;

pub const RULE: &str = "----------------------------------------";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, StdoutLock<'static>> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout().lock())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn rule(&mut self) -> Result<()> {
        self.say(RULE)
    }

    /// Shows `msg` and returns the next line, trimmed and lower-cased.
    ///
    /// # Errors
    ///
    /// Fails when the input stream is closed.
    pub fn prompt(&mut self, msg: &str) -> Result<String> {
        match self.prompt_opt(msg)? {
            Some(answer) => Ok(answer),
            None => bail!("input closed"),
        }
    }

    /// Like [`Console::prompt`], but end of input yields `None`.
    pub fn prompt_opt(&mut self, msg: &str) -> Result<Option<String>> {
        write!(self.output, "{msg}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from console")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Prompts until `accept` maps the answer to a value.
    pub fn ask_with<T>(
        &mut self,
        msg: &str,
        what: &str,
        mut accept: impl FnMut(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let token = self.prompt(msg)?;
            if let Some(value) = accept(&token) {
                return Ok(value);
            }
            debug!(token = %token, what, "Rejected console input");
            writeln!(self.output, "\n\nInvalid entry. You entered: {token}")?;
            writeln!(self.output, "Please enter a valid {what} from the list specified.\n")?;
        }
    }

    /// Prompts until the answer parses as `T`.
    pub fn ask_until<T: FromStr>(&mut self, msg: &str, what: &str) -> Result<T> {
        self.ask_with(msg, what, |token| token.parse().ok())
    }
}
