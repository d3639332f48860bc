//! Fetch-and-analyze flow for one instrument pair.

use crate::data_source::{HistoryRequest, PriceSource, SourceError};
use crate::{DateRange, PairAnalysis, PriceSeries, Symbol};

/// Both repaired price series and the statistics derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub left: PriceSeries,
    pub right: PriceSeries,
    pub analysis: PairAnalysis,
}

/// Fetches `left` then `right` (never concurrently), forward-fills both in
/// place and computes the pair statistics on the filled series.
pub async fn compare(
    source: &dyn PriceSource,
    left: &Symbol,
    right: &Symbol,
    range: DateRange,
) -> Result<Comparison, SourceError> {
    let left = fetch_filled(source, left, range).await?;
    let right = fetch_filled(source, right, range).await?;
    let analysis = PairAnalysis::compute(&left, &right);

    Ok(Comparison {
        left,
        right,
        analysis,
    })
}

async fn fetch_filled(
    source: &dyn PriceSource,
    symbol: &Symbol,
    range: DateRange,
) -> Result<PriceSeries, SourceError> {
    let request = HistoryRequest::for_range(symbol.clone(), range)?;
    let mut series = source.daily_history(request).await?;

    let filled = series.forward_fill();
    if filled > 0 {
        tracing::debug!(symbol = %symbol, filled, source = source.name(), "forward-filled gaps");
    }

    Ok(series)
}
