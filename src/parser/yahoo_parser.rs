// Yahoo Finance chart API parsing
use crate::model::{HistoryPoint, SourceError};
use crate::utils::{date_from_unix, round2};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Option<ChartIndicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    chart_previous_close: Option<f64>,
    previous_close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteReading {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub history: Vec<HistoryPoint>,
}

/// Parses a `/v8/finance/chart/{symbol}` body into the latest price and the
/// daily close series. Null closes (holidays, halted sessions) are skipped.
pub fn parse_chart(body: &str) -> Result<QuoteReading, SourceError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    if let Some(err) = response.chart.error {
        return Err(SourceError::Parse(format!(
            "chart error {}: {}",
            err.code.unwrap_or_default(),
            err.description.unwrap_or_default()
        )));
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| SourceError::MissingField("chart.result".into()))?;

    let price = result
        .meta
        .regular_market_price
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| SourceError::MissingField("regularMarketPrice".into()))?;
    let previous_close = result
        .meta
        .chart_previous_close
        .or(result.meta.previous_close)
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(price);

    let closes = result
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .map(|q| q.close)
        .unwrap_or_default();

    let history = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let close = close.filter(|c| c.is_finite())?;
            Some(HistoryPoint::new(date_from_unix(*ts)?, round2(close)))
        })
        .collect();

    Ok(QuoteReading {
        price: round2(price),
        change: round2(price - previous_close),
        change_percent: round2((price - previous_close) / previous_close * 100.0),
        history,
    })
}
