// Yahoo Finance chart API adapter
use crate::model::{IndicatorKey, IndicatorSnapshot, SourceError};
use crate::parser::parse_chart;
use crate::scraper::{HttpFetcher, IndicatorSource};
use crate::synthetic::{synthetic_history, SYNTHETIC_DAYS};
use chrono::Utc;
use tracing::{debug, warn};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/";

pub struct YahooChartSource {
    fetcher: HttpFetcher,
    key: IndicatorKey,
    history_days: u32,
}

impl YahooChartSource {
    pub fn new(fetcher: HttpFetcher, key: IndicatorKey, history_days: u32) -> Self {
        Self {
            fetcher,
            key,
            history_days,
        }
    }

    fn build_url(&self) -> String {
        format!("{}{}", CHART_URL, self.key.symbol().replace('^', "%5E"))
    }
}

#[async_trait::async_trait]
impl IndicatorSource for YahooChartSource {
    fn key(&self) -> IndicatorKey {
        self.key
    }

    fn cache_key(&self) -> String {
        format!("yahoo:{}", self.key.symbol())
    }

    async fn fetch(&self) -> Result<IndicatorSnapshot, SourceError> {
        let now = Utc::now();
        let period2 = now.timestamp().to_string();
        let period1 = (now.timestamp() - i64::from(self.history_days) * 86_400).to_string();

        let body = self
            .fetcher
            .fetch_text(
                &self.build_url(),
                &[
                    ("period1", period1.as_str()),
                    ("period2", period2.as_str()),
                    ("interval", "1d"),
                ],
            )
            .await?;
        let reading = parse_chart(&body)?;
        debug!("{} = {} ({}%)", self.key, reading.price, reading.change_percent);

        let mut snapshot = IndicatorSnapshot::new(self.key, reading.price, reading.change, "yahoo");
        snapshot.change_percent = Some(reading.change_percent);
        snapshot.history = if reading.history.is_empty() {
            warn!("{}: chart has no closes, synthesizing history", self.key);
            synthetic_history(
                reading.price,
                reading.price * 0.01,
                SYNTHETIC_DAYS,
                now.date_naive(),
                &mut rand::rng(),
            )
        } else {
            reading.history
        };
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn escapes_caret_in_symbol() {
        let fetcher = HttpFetcher::new("test-agent", Duration::from_secs(1)).unwrap();
        let source = YahooChartSource::new(fetcher, IndicatorKey::TaiexIndex, 90);
        assert_eq!(source.build_url(), "https://query1.finance.yahoo.com/v8/finance/chart/%5ETWII");
        assert_eq!(source.cache_key(), "yahoo:^TWII");
    }
}
