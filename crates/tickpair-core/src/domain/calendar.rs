use std::fmt::{Display, Formatter};

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

/// Source of the current calendar date.
///
/// Every check asks the clock again, so a prompt left open across midnight
/// sees the new day.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Local wall-clock date, falling back to UTC when the local offset cannot be determined.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        match OffsetDateTime::now_local() {
            Ok(now) => now.date(),
            Err(error) => {
                tracing::debug!(%error, "local offset unavailable, using UTC date");
                OffsetDateTime::now_utc().date()
            }
        }
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        value: input.to_owned(),
    };

    let bytes = input.as_bytes();
    if bytes.len() != 10 {
        return Err(invalid());
    }
    let shape_ok = bytes.iter().enumerate().all(|(index, byte)| match index {
        4 | 7 => *byte == b'-',
        _ => byte.is_ascii_digit(),
    });
    if !shape_ok {
        return Err(invalid());
    }

    let date =
        Date::parse(input, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())?;
    // Year 0 is not a calendar year.
    if date.year() < 1 {
        return Err(invalid());
    }
    Ok(date)
}

/// Whether `input` is a real calendar date written as `YYYY-MM-DD`.
pub fn is_valid_date(input: &str) -> bool {
    parse_date(input).is_ok()
}

/// Whether `date` lies before today, or on today when `include_today` is set.
pub fn is_not_future_date(date: Date, include_today: bool, clock: &dyn Clock) -> bool {
    let today = clock.today();
    if include_today {
        date <= today
    } else {
        date < today
    }
}

/// Validated start/end pair entered by the user.
///
/// Ordering between the two ends is not checked here; see [`DateRange::ensure_ordered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    pub fn ensure_ordered(&self) -> Result<(), ValidationError> {
        if self.start > self.end {
            return Err(ValidationError::InvertedRange {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn accepts_real_calendar_dates() {
        assert!(is_valid_date("2000-01-01"));
        assert!(is_valid_date("2024-02-29"));
        assert!(is_valid_date("1999-12-31"));
        assert!(is_valid_date("0001-01-01"));
    }

    #[test]
    fn rejects_malformed_dates() {
        for input in [
            "",
            "2023/01/01",
            "2023-1-01",
            "2023-01-1",
            "20230101",
            "2023-13-01",
            "2023-00-10",
            "2023-02-29",
            "2023-04-31",
            "0000-01-01",
            "0000-12-31",
            "abcd-ef-gh",
            "+023-01-01",
            " 2023-01-01",
            "2023-01-01 ",
        ] {
            assert!(!is_valid_date(input), "{input:?} must be rejected");
        }
    }

    #[test]
    fn parse_error_carries_the_input() {
        let err = parse_date("2023-02-30").expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                value: String::from("2023-02-30")
            }
        );
    }

    #[test]
    fn strict_check_rejects_today_and_later() {
        let clock = FixedClock(date!(2024 - 06 - 15));
        assert!(is_not_future_date(date!(2024 - 06 - 14), false, &clock));
        assert!(!is_not_future_date(date!(2024 - 06 - 15), false, &clock));
        assert!(!is_not_future_date(date!(2024 - 06 - 16), false, &clock));
    }

    #[test]
    fn inclusive_check_accepts_today() {
        let clock = FixedClock(date!(2024 - 06 - 15));
        assert!(is_not_future_date(date!(2024 - 06 - 15), true, &clock));
        assert!(!is_not_future_date(date!(2024 - 06 - 16), true, &clock));
    }

    #[test]
    fn inverted_range_is_reported() {
        let range = DateRange::new(date!(2023 - 01 - 02), date!(2023 - 01 - 01));
        assert!(matches!(
            range.ensure_ordered(),
            Err(ValidationError::InvertedRange { .. })
        ));
        assert_eq!(range.to_string(), "2023-01-02..2023-01-01");
    }
}
