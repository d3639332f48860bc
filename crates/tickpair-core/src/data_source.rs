//! Price source trait and its request/error types.
//!
//! A [`PriceSource`] turns a [`HistoryRequest`] into a [`PriceSeries`]. The
//! CLI calls it once per instrument, sequentially, and treats any
//! [`SourceError`] as fatal.
//!
//! ```rust,ignore
//! use tickpair_core::{HistoryRequest, PriceSource, Symbol, YahooAdapter};
//!
//! async fn fetch(adapter: &YahooAdapter) -> Result<(), Box<dyn std::error::Error>> {
//!     let request = HistoryRequest::new(Symbol::parse("PG")?, start, end)?;
//!     let series = adapter.daily_history(request).await?;
//!     println!("{} rows", series.len());
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use time::Date;

use crate::{DateRange, PriceSeries, Symbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failure or non-success status.
    Unavailable,
    /// Unknown symbol, or no rows for the requested range.
    NotFound,
    InvalidRequest,
    /// Response could not be understood.
    Internal,
}

/// Structured error returned by price sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Daily history request. `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub start: Date,
    pub end: Date,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, start: Date, end: Date) -> Result<Self, SourceError> {
        DateRange::new(start, end)
            .ensure_ordered()
            .map_err(|error| SourceError::invalid_request(error.to_string()))?;

        Ok(Self { symbol, start, end })
    }

    pub fn for_range(symbol: Symbol, range: DateRange) -> Result<Self, SourceError> {
        Self::new(symbol, range.start, range.end)
    }
}

/// Contract every historical price provider implements.
pub trait PriceSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches daily rows for `req.symbol` between `req.start` (inclusive)
    /// and `req.end` (exclusive).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if:
    /// - The provider is unreachable or answers with a failure status
    /// - The symbol is unknown or the range holds no rows
    /// - The payload cannot be parsed
    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>>;
}
