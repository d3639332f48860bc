//! # Domain Models
//!
//! Canonical domain types for tickpair.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker (`PG`, `^GSPC`) |
//! | [`DailyBar`] | One day of provider prices, gaps kept as `None` |
//! | [`DateRange`] | Start/end pair entered by the user |
//! | [`Clock`] | Injected source of "today" |
//!
//! Date strings are validated with [`is_valid_date`] and checked against the
//! clock with [`is_not_future_date`].

mod calendar;
mod models;
mod symbol;

pub use calendar::{
    is_not_future_date, is_valid_date, parse_date, Clock, DateRange, FixedClock, SystemClock,
};
pub use models::DailyBar;
pub use symbol::Symbol;
