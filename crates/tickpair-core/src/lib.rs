//! # Tickpair Core
//!
//! Price history, daily return statistics and pairwise correlation for two
//! instruments.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Price source adapters (Yahoo chart API) |
//! | [`comparison`] | Sequential fetch, forward-fill and analysis of a pair |
//! | [`data_source`] | Price source trait, request and error types |
//! | [`domain`] | Symbols, daily bars, calendar dates and the clock |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`series`] | Date-indexed price and return containers |
//! | [`stats`] | Summary statistics, Pearson correlation, pair analysis |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tickpair_core::{HistoryRequest, PairAnalysis, PriceSource, Symbol, YahooAdapter};
//!
//! let adapter = YahooAdapter::default();
//! let mut left = adapter.daily_history(HistoryRequest::new(Symbol::parse("^GSPC")?, start, end)?).await?;
//! let mut right = adapter.daily_history(HistoryRequest::new(Symbol::parse("PG")?, start, end)?).await?;
//! left.forward_fill();
//! right.forward_fill();
//!
//! let analysis = PairAnalysis::compute(&left, &right);
//! println!("correlation: {}", analysis.correlation.coefficient);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / prompts  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Price Source    │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest/static) │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  PriceSeries    │────▶│ PairAnalysis     │
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod comparison;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod series;
pub mod stats;

pub use adapters::YahooAdapter;
pub use comparison::{compare, Comparison};
pub use data_source::{HistoryRequest, PriceSource, SourceError, SourceErrorKind};
pub use domain::{
    is_not_future_date, is_valid_date, parse_date, Clock, DailyBar, DateRange, FixedClock, Symbol,
    SystemClock,
};
pub use error::{CoreError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};
pub use series::{align, AlignedReturns, PriceSeries, ReturnPoint, ReturnSeries};
pub use stats::{pearson, Correlation, PairAnalysis, SummaryStatistics, NORMALIZED_BASE};
