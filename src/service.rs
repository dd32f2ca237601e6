// Request/response procedures exposed to the presentation layer.
use crate::aggregator::Aggregator;
use crate::analyzer::stats::{summarize, SummaryStats};
use crate::analyzer::{Analyzer, AnalyzerImpl, MarketStatus};
use crate::model::{AggregatedSnapshot, HistoryPoint, IndicatorKey, IndicatorSnapshot, MarketError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_DAYS: u32 = 30;
pub const MAX_DAYS: u32 = 365;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorDetail {
    pub key: IndicatorKey,
    pub snapshot: IndicatorSnapshot,
    pub last_updated: DateTime<Utc>,
}

pub struct MarketDataService {
    aggregator: Aggregator,
    analyzer: AnalyzerImpl,
}

impl MarketDataService {
    pub fn new(aggregator: Aggregator, analyzer: AnalyzerImpl) -> Self {
        Self { aggregator, analyzer }
    }

    pub async fn all_indicators(&self) -> Result<AggregatedSnapshot, MarketError> {
        self.aggregator.collect_all().await
    }

    pub async fn indicator_detail(&self, key: &str) -> Result<IndicatorDetail, MarketError> {
        let key: IndicatorKey = key.parse()?;
        let snapshot = self.aggregator.collect_one(key).await?;
        Ok(IndicatorDetail {
            key,
            snapshot,
            last_updated: Utc::now(),
        })
    }

    /// The last `days` points (default 30), or the whole history when shorter.
    pub async fn historical_data(&self, key: &str, days: Option<u32>) -> Result<Vec<HistoryPoint>, MarketError> {
        let days = validate_days(days)?;
        let key: IndicatorKey = key.parse()?;
        let snapshot = self.aggregator.collect_one(key).await?;
        debug!("{}: {} of {} points requested", key, days, snapshot.history.len());
        Ok(tail(snapshot.history, days))
    }

    /// Statistics over the same window as `historical_data`. An empty window
    /// yields zeros.
    pub async fn summary_stats(&self, key: &str, days: Option<u32>) -> Result<SummaryStats, MarketError> {
        let window = self.historical_data(key, days).await?;
        Ok(summarize(&window).unwrap_or(SummaryStats {
            min: 0.0,
            max: 0.0,
            avg: 0.0,
            latest: 0.0,
            change_percent: 0.0,
            count: 0,
        }))
    }

    pub async fn market_status(&self) -> Result<MarketStatus, MarketError> {
        let snapshot = self.aggregator.collect_all().await?;
        Ok(self.analyzer.market_status(&snapshot))
    }
}

fn validate_days(days: Option<u32>) -> Result<usize, MarketError> {
    let days = days.unwrap_or(DEFAULT_DAYS);
    if !(1..=MAX_DAYS).contains(&days) {
        return Err(MarketError::InvalidDays(days));
    }
    Ok(days as usize)
}

fn tail(mut history: Vec<HistoryPoint>, days: usize) -> Vec<HistoryPoint> {
    let start = history.len().saturating_sub(days);
    history.split_off(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceError;
    use crate::scraper::IndicatorSource;
    use crate::storage::DataCache;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::time::Duration;

    /// Serves a fixed history of `len` points valued 1..=len.
    struct SeriesSource {
        key: IndicatorKey,
        len: usize,
    }

    #[async_trait::async_trait]
    impl IndicatorSource for SeriesSource {
        fn key(&self) -> IndicatorKey {
            self.key
        }

        fn cache_key(&self) -> String {
            format!("series:{}", self.key)
        }

        async fn fetch(&self) -> Result<IndicatorSnapshot, SourceError> {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let mut snapshot = IndicatorSnapshot::new(self.key, self.len as f64, 1.0, "series");
            snapshot.history = (0..self.len)
                .map(|i| HistoryPoint::new(start + chrono::Duration::days(i as i64), (i + 1) as f64))
                .collect();
            Ok(snapshot)
        }
    }

    fn service(len: usize) -> MarketDataService {
        let sources: Vec<Arc<dyn IndicatorSource>> = vec![Arc::new(SeriesSource {
            key: IndicatorKey::TaiexIndex,
            len,
        })];
        let aggregator = Aggregator::new(sources, Arc::new(DataCache::new()), Duration::from_secs(60));
        MarketDataService::new(aggregator, AnalyzerImpl::new())
    }

    #[tokio::test]
    async fn history_window_is_clamped_to_available_points() {
        let svc = service(90);
        let week = svc.historical_data("taiexIndex", Some(7)).await.unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week.last().unwrap().value, 90.0);
        assert_eq!(week[0].value, 84.0);

        assert_eq!(svc.historical_data("taiexIndex", None).await.unwrap().len(), 30);
        assert_eq!(svc.historical_data("taiexIndex", Some(365)).await.unwrap().len(), 90);
    }

    #[tokio::test]
    async fn rejects_out_of_range_days() {
        let svc = service(10);
        for days in [0, 366] {
            let err = svc.historical_data("taiexIndex", Some(days)).await.unwrap_err();
            assert!(matches!(err, MarketError::InvalidDays(d) if d == days));
        }
    }

    #[tokio::test]
    async fn unknown_indicator_is_not_found() {
        let svc = service(10);
        let err = svc.indicator_detail("bitcoin").await.unwrap_err();
        assert!(matches!(err, MarketError::IndicatorNotFound(_)));
        assert!(svc.summary_stats("bitcoin", None).await.is_err());
    }

    #[tokio::test]
    async fn detail_carries_ma10() {
        let svc = service(12);
        let detail = svc.indicator_detail("TAIEX").await.unwrap();
        assert_eq!(detail.key, IndicatorKey::TaiexIndex);
        assert_eq!(detail.snapshot.latest_moving_average(), Some(7.5));
    }

    #[tokio::test]
    async fn summary_over_window() {
        let svc = service(20);
        let stats = svc.summary_stats("taiexIndex", Some(5)).await.unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 16.0);
        assert_eq!(stats.max, 20.0);
        assert_eq!(stats.avg, 18.0);
        assert_eq!(stats.latest, 20.0);
        assert_eq!(stats.change_percent, 25.0);
    }

    #[tokio::test]
    async fn empty_history_gives_zero_summary() {
        let svc = service(0);
        let stats = svc.summary_stats("taiexIndex", None).await.unwrap();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.avg, 0.0);
    }

    #[tokio::test]
    async fn status_and_snapshot_cover_every_indicator() {
        let svc = service(30);
        let snapshot = svc.all_indicators().await.unwrap();
        assert_eq!(snapshot.indicators.len(), IndicatorKey::ALL.len());
        assert_eq!(snapshot.fallback_used.len(), IndicatorKey::ALL.len() - 1);

        let status = svc.market_status().await.unwrap();
        // TAIEX value 30 sits above its MA10 of 25.5
        assert_eq!(status.market_trend, crate::analyzer::market_status::MarketTrend::Bullish);
    }
}
