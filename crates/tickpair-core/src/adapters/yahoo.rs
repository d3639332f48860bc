use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{Date, OffsetDateTime, Time};

use crate::data_source::{HistoryRequest, PriceSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{DailyBar, PriceSeries, Symbol};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// ============================================================================
// Yahoo Adapter
// ============================================================================

/// Daily history from the Yahoo Finance chart endpoint.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: 10_000,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn chart_endpoint(&self, req: &HistoryRequest) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=div%2Csplit&includeAdjustedClose=true",
            self.base_url,
            urlencoding::encode(req.symbol.as_str()),
            unix_midnight(req.start),
            unix_midnight(req.end),
        )
    }

    async fn fetch_chart(&self, req: &HistoryRequest) -> Result<PriceSeries, SourceError> {
        let endpoint = self.chart_endpoint(req);
        tracing::debug!(symbol = %req.symbol, %endpoint, "requesting yahoo chart");

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            tracing::warn!(symbol = %req.symbol, error = error.message(), "yahoo transport error");
            if error.retryable() {
                SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("yahoo transport error: {}", error.message()))
            }
        })?;

        if response.status == 404 {
            let detail = api_error_description(&response.body)
                .unwrap_or_else(|| String::from("symbol not found"));
            return Err(SourceError::not_found(format!(
                "yahoo has no chart for '{}': {detail}",
                req.symbol
            )));
        }

        if !response.is_success() {
            tracing::warn!(symbol = %req.symbol, status = response.status, "yahoo returned failure status");
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart(&req.symbol, &response.body)
    }
}

impl PriceSource for YahooAdapter {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let series = self.fetch_chart(&req).await?;
            tracing::info!(
                symbol = %req.symbol,
                start = %req.start,
                end = %req.end,
                rows = series.len(),
                "fetched daily history"
            );
            Ok(series)
        })
    }
}

fn unix_midnight(date: Date) -> i64 {
    date.with_time(Time::MIDNIGHT).assume_utc().unix_timestamp()
}

fn api_error_description(body: &str) -> Option<String> {
    let parsed: YahooChartResponse = serde_json::from_str(body).ok()?;
    parsed.chart.error.map(|error| error.describe())
}

/// Converts a chart payload into a price series.
///
/// Timestamps are shifted by the exchange's `gmtoffset` before taking the
/// calendar date, so a 09:30 New York open stays on its trading day.
pub(crate) fn parse_chart(symbol: &Symbol, body: &str) -> Result<PriceSeries, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart_response.chart.error {
        return Err(SourceError::not_found(format!(
            "yahoo chart API error for '{symbol}': {}",
            error.describe()
        )));
    }

    let result = chart_response
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::not_found(format!("no chart data for '{symbol}'")))?;

    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Err(SourceError::not_found(format!(
            "no rows for '{symbol}' in the requested range"
        )));
    }

    let gmt_offset = result.meta.map(|meta| meta.gmtoffset).unwrap_or(0);
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|series| series.adjclose);

    let mut rows = Vec::with_capacity(timestamps.len());
    for (i, &ts_value) in timestamps.iter().enumerate() {
        let date = OffsetDateTime::from_unix_timestamp(ts_value + gmt_offset)
            .map_err(|e| SourceError::internal(format!("invalid timestamp {ts_value}: {e}")))?
            .date();

        let close = cell(&quote.close, i);
        let adj_close = match &adjclose {
            Some(values) => cell(values, i),
            None => close,
        };
        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok());

        let bar = DailyBar::new(
            date,
            cell(&quote.open, i),
            cell(&quote.high, i),
            cell(&quote.low, i),
            close,
            adj_close,
            volume,
        )
        .map_err(|e| SourceError::internal(e.to_string()))?;
        rows.push(bar);
    }

    Ok(PriceSeries::new(symbol.clone(), rows))
}

fn cell(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

// ============================================================================
// Yahoo Chart API Response Structures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooApiError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl YahooApiError {
    fn describe(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(description)) => format!("{code}: {description}"),
            (None, Some(description)) => description.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => String::from("unknown error"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
    #[serde(default)]
    adjclose: Vec<YahooAdjClose>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::{HttpError, HttpResponse};
    use std::sync::Mutex;
    use time::macros::date;

    // 2024-01-02 .. 2024-01-04 14:30 UTC, New York offset -5h.
    const CHART_FIXTURE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"currency": "USD", "symbol": "PG", "gmtoffset": -18000},
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": {
                    "quote": [{
                        "open": [146.0, null, 147.5],
                        "high": [147.0, null, 148.0],
                        "low": [145.5, null, 146.9],
                        "close": [146.5, null, 147.8],
                        "volume": [6000000, null, 5500000]
                    }],
                    "adjclose": [{"adjclose": [140.1, null, 141.3]}]
                }
            }],
            "error": null
        }
    }"#;

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn replying(response: Result<HttpResponse, HttpError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn request() -> HistoryRequest {
        HistoryRequest::new(
            Symbol::parse("^GSPC").expect("valid symbol"),
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 05),
        )
        .expect("valid request")
    }

    #[tokio::test]
    async fn builds_chart_url_with_epoch_bounds() {
        let client = Arc::new(RecordingHttpClient::replying(Ok(HttpResponse::ok_json(
            CHART_FIXTURE,
        ))));
        let adapter = YahooAdapter::with_http_client(client.clone())
            .with_base_url("https://chart.example.test/")
            .with_timeout_ms(2_500);

        adapter
            .daily_history(request())
            .await
            .expect("fixture should parse");

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "https://chart.example.test/v8/finance/chart/%5EGSPC?period1=1704067200&period2=1704412800&interval=1d&events=div%2Csplit&includeAdjustedClose=true"
        );
        assert_eq!(requests[0].timeout_ms, 2_500);
    }

    #[test]
    fn parses_rows_and_keeps_gaps() {
        let symbol = Symbol::parse("PG").expect("valid symbol");
        let series = parse_chart(&symbol, CHART_FIXTURE).expect("fixture should parse");

        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), Some(date!(2024 - 01 - 02)));
        assert_eq!(series.last_date(), Some(date!(2024 - 01 - 04)));

        let gap = series.get(date!(2024 - 01 - 03)).expect("gap row is kept");
        assert_eq!(gap.adj_close, None);
        assert_eq!(gap.volume, None);

        let first = series.get(date!(2024 - 01 - 02)).expect("first row");
        assert_eq!(first.close, Some(146.5));
        assert_eq!(first.adj_close, Some(140.1));
        assert_eq!(first.volume, Some(6_000_000));
    }

    #[test]
    fn falls_back_to_close_without_adjclose_block() {
        let body = r#"{"chart":{"result":[{"timestamp":[1704205800],
            "indicators":{"quote":[{"close":[10.0]}]}}],"error":null}}"#;
        let symbol = Symbol::parse("PG").expect("valid symbol");

        let series = parse_chart(&symbol, body).expect("should parse");

        assert_eq!(series.rows()[0].adj_close, Some(10.0));
    }

    #[test]
    fn api_error_maps_to_not_found() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let symbol = Symbol::parse("NOPE").expect("valid symbol");

        let error = parse_chart(&symbol, body).expect_err("api error must fail");

        assert_eq!(error.kind(), SourceErrorKind::NotFound);
        assert!(error.message().contains("symbol may be delisted"));
    }

    #[test]
    fn empty_range_maps_to_not_found() {
        let body = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;
        let symbol = Symbol::parse("PG").expect("valid symbol");

        let error = parse_chart(&symbol, body).expect_err("no rows must fail");
        assert_eq!(error.kind(), SourceErrorKind::NotFound);
    }

    #[test]
    fn malformed_body_is_internal() {
        let symbol = Symbol::parse("PG").expect("valid symbol");
        let error = parse_chart(&symbol, "<html>").expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Internal);
    }

    #[tokio::test]
    async fn not_found_status_uses_error_description() {
        let client = Arc::new(RecordingHttpClient::replying(Ok(HttpResponse {
            status: 404,
            body: String::from(
                r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#,
            ),
        })));
        let adapter = YahooAdapter::with_http_client(client);

        let error = adapter
            .daily_history(request())
            .await
            .expect_err("404 must fail");

        assert_eq!(error.kind(), SourceErrorKind::NotFound);
        assert!(error.message().contains("No data found"));
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let client = Arc::new(RecordingHttpClient::replying(Ok(HttpResponse {
            status: 503,
            body: String::new(),
        })));
        let adapter = YahooAdapter::with_http_client(client);

        let error = adapter
            .daily_history(request())
            .await
            .expect_err("503 must fail");

        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.retryable());
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        let client = Arc::new(RecordingHttpClient::replying(Err(HttpError::new(
            "upstream timeout",
        ))));
        let adapter = YahooAdapter::with_http_client(client);

        let error = adapter
            .daily_history(request())
            .await
            .expect_err("transport error must fail");

        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.message().contains("upstream timeout"));
    }
}
