//! Line-oriented prompting over any reader/writer pair.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Writes prompts to `output` and reads trimmed answers from `input`.
///
/// Every read returns `Ok(None)` once the input is exhausted, so callers can
/// end the session instead of re-prompting forever.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for plain messages.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Show `label` and read one trimmed line.
    pub fn line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Re-prompt until the answer parses as `T` and lies within `range`.
    pub fn number_in<T>(&mut self, label: &str, range: &RangeInclusive<T>) -> io::Result<Option<T>>
    where
        T: FromStr + PartialOrd + Display,
    {
        loop {
            let Some(answer) = self.line(label)? else {
                return Ok(None);
            };
            let value = match answer.parse::<T>() {
                Ok(value) => value,
                Err(_) => {
                    writeln!(self.output, "* Enter a valid number")?;
                    continue;
                }
            };
            if value < *range.start() {
                writeln!(self.output, "* Must be >= {}", range.start())?;
            } else if value > *range.end() {
                writeln!(self.output, "* Must be <= {}", range.end())?;
            } else {
                return Ok(Some(value));
            }
        }
    }
}
