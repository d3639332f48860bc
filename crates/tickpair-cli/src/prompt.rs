//! Interactive start/end date prompts.

use std::io::{self, BufRead, Write};

use time::Date;

use tickpair_core::{is_not_future_date, parse_date, Clock, DateRange};

use crate::config::DateDefaults;

const START_RETRY_MESSAGE: &str = "Invalid date format or future/present date. Please try again.";
const END_RETRY_MESSAGE: &str = "Invalid date format or future date. Please try again.";

/// Which end of the range is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Start,
    End,
}

impl Field {
    const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }

    /// The end date may be today; the start date must be strictly earlier.
    const fn includes_today(self) -> bool {
        matches!(self, Self::End)
    }

    const fn retry_message(self) -> &'static str {
        match self {
            Self::Start => START_RETRY_MESSAGE,
            Self::End => END_RETRY_MESSAGE,
        }
    }
}

/// Reads dates line by line until each passes validation.
pub struct DatePrompter<'a, R, W> {
    input: R,
    output: W,
    clock: &'a dyn Clock,
}

impl<'a, R: BufRead, W: Write> DatePrompter<'a, R, W> {
    pub fn new(input: R, output: W, clock: &'a dyn Clock) -> Self {
        Self {
            input,
            output,
            clock,
        }
    }

    /// Asks for the start date, then the end date.
    pub fn prompt_range(&mut self, defaults: &DateDefaults) -> io::Result<DateRange> {
        let start = self.prompt(Field::Start, &defaults.start)?;
        let end = self.prompt(Field::End, &defaults.end)?;
        Ok(DateRange::new(start, end))
    }

    fn prompt(&mut self, field: Field, default: &str) -> io::Result<Date> {
        write!(
            self.output,
            "Enter the {} date (YYYY-MM-DD, or press Enter for default value: {default}): ",
            field.name()
        )?;
        let mut entry = self.read_line()?;
        if entry.is_empty() {
            entry = default.to_owned();
        }

        loop {
            if let Some(date) = self.accept(field, &entry) {
                return Ok(date);
            }

            tracing::debug!(field = field.name(), entry = %entry, "rejected date entry");
            writeln!(self.output, "{}", field.retry_message())?;
            write!(self.output, "Enter the {} date (YYYY-MM-DD): ", field.name())?;
            entry = self.read_line()?;
        }
    }

    fn accept(&self, field: Field, entry: &str) -> Option<Date> {
        let date = parse_date(entry).ok()?;
        is_not_future_date(date, field.includes_today(), self.clock).then_some(date)
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed while waiting for a date",
            ));
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(trimmed.to_owned())
    }
}
