//! Date-indexed price and return containers.
//!
//! [`PriceSeries`] keeps provider rows sorted by date with unique dates. Gaps
//! stay as `None` until [`PriceSeries::forward_fill`] repairs them in place
//! (or [`PriceSeries::forward_filled`] returns a repaired copy). Derived
//! series such as [`ReturnSeries`] are new values aligned to the same dates.

use serde::Serialize;
use time::Date;

use crate::{DailyBar, Symbol};

/// Ordered daily price history for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    rows: Vec<DailyBar>,
}

impl PriceSeries {
    /// Sorts rows by date; when a date repeats, the row seen last wins.
    pub fn new(symbol: Symbol, mut rows: Vec<DailyBar>) -> Self {
        rows.sort_by_key(|row| row.date);

        let mut unique: Vec<DailyBar> = Vec::with_capacity(rows.len());
        for row in rows {
            match unique.last_mut() {
                Some(last) if last.date == row.date => *last = row,
                _ => unique.push(row),
            }
        }

        Self {
            symbol,
            rows: unique,
        }
    }

    pub fn rows(&self) -> &[DailyBar] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<Date> {
        self.rows.first().map(|row| row.date)
    }

    pub fn last_date(&self) -> Option<Date> {
        self.rows.last().map(|row| row.date)
    }

    pub fn get(&self, date: Date) -> Option<&DailyBar> {
        self.rows
            .binary_search_by_key(&date, |row| row.date)
            .ok()
            .map(|index| &self.rows[index])
    }

    pub fn adjusted_closes(&self) -> impl Iterator<Item = (Date, Option<f64>)> + '_ {
        self.rows.iter().map(|row| (row.date, row.adj_close))
    }

    /// Replaces every missing cell with the closest earlier value in the same
    /// column and returns how many cells were filled. Leading gaps stay empty.
    pub fn forward_fill(&mut self) -> usize {
        fill_column(&mut self.rows, |row| &mut row.open)
            + fill_column(&mut self.rows, |row| &mut row.high)
            + fill_column(&mut self.rows, |row| &mut row.low)
            + fill_column(&mut self.rows, |row| &mut row.close)
            + fill_column(&mut self.rows, |row| &mut row.adj_close)
            + fill_column(&mut self.rows, |row| &mut row.volume)
    }

    pub fn forward_filled(&self) -> Self {
        let mut filled = self.clone();
        filled.forward_fill();
        filled
    }

    /// Day-over-day fractional change of the adjusted close.
    ///
    /// The first row, and any row whose own or previous close is missing,
    /// has no return. Non-finite ratios (a zero previous close) count as missing.
    pub fn daily_returns(&self) -> ReturnSeries {
        let mut points = Vec::with_capacity(self.rows.len());
        let mut previous: Option<f64> = None;

        for row in &self.rows {
            let value = match (previous, row.adj_close) {
                (Some(prev), Some(current)) => {
                    Some(current / prev - 1.0).filter(|change| change.is_finite())
                }
                _ => None,
            };
            points.push(ReturnPoint {
                date: row.date,
                value,
            });
            previous = row.adj_close;
        }

        ReturnSeries {
            symbol: self.symbol.clone(),
            points,
        }
    }

    /// Adjusted closes rescaled so the first available one equals `base`.
    pub fn normalized(&self, base: f64) -> Vec<(Date, f64)> {
        let Some(reference) = self.rows.iter().find_map(|row| row.adj_close) else {
            return Vec::new();
        };
        if reference == 0.0 {
            return Vec::new();
        }

        self.rows
            .iter()
            .filter_map(|row| row.adj_close.map(|price| (row.date, price / reference * base)))
            .collect()
    }
}

fn fill_column<T: Copy>(
    rows: &mut [DailyBar],
    column: impl Fn(&mut DailyBar) -> &mut Option<T>,
) -> usize {
    let mut last: Option<T> = None;
    let mut filled = 0;
    for row in rows.iter_mut() {
        let cell = column(row);
        if let Some(value) = *cell {
            last = Some(value);
        } else if let Some(value) = last {
            *cell = Some(value);
            filled += 1;
        }
    }
    filled
}

/// Daily return on one date; `None` when undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnPoint {
    pub date: Date,
    pub value: Option<f64>,
}

/// Daily returns for one instrument, same dates as the source prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    pub symbol: Symbol,
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn from_points(symbol: Symbol, points: Vec<ReturnPoint>) -> Self {
        Self { symbol, points }
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Defined returns only, in date order.
    pub fn dropna(&self) -> Vec<(Date, f64)> {
        self.points
            .iter()
            .filter_map(|point| point.value.map(|value| (point.date, value)))
            .collect()
    }

    pub fn defined_values(&self) -> Vec<f64> {
        self.points.iter().filter_map(|point| point.value).collect()
    }
}

/// Returns of two instruments paired on the dates both define.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedReturns {
    pub dates: Vec<Date>,
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl AlignedReturns {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.left.iter().copied().zip(self.right.iter().copied())
    }
}

/// Inner join of the defined returns of `left` and `right` on date.
pub fn align(left: &ReturnSeries, right: &ReturnSeries) -> AlignedReturns {
    let left = left.dropna();
    let right = right.dropna();
    let mut aligned = AlignedReturns::default();

    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        let (left_date, left_value) = left[i];
        let (right_date, right_value) = right[j];
        if left_date < right_date {
            i += 1;
        } else if right_date < left_date {
            j += 1;
        } else {
            aligned.dates.push(left_date);
            aligned.left.push(left_value);
            aligned.right.push(right_value);
            i += 1;
            j += 1;
        }
    }

    aligned
}
