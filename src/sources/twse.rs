// TWSE margin trading adapter
use crate::model::{IndicatorKey, IndicatorSnapshot, SourceError};
use crate::parser::parse_margin;
use crate::scraper::{HttpFetcher, IndicatorSource};
use crate::synthetic::{synthetic_history, SYNTHETIC_DAYS};
use crate::utils::round2;
use chrono::Utc;

const MARGIN_URL: &str = "https://www.twse.com.tw/rwd/zh/marginTrading/MI_MARGN";

pub struct TwseMarginSource {
    fetcher: HttpFetcher,
}

impl TwseMarginSource {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl IndicatorSource for TwseMarginSource {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::MarginBalance
    }

    fn cache_key(&self) -> String {
        "twse:margin".to_string()
    }

    async fn fetch(&self) -> Result<IndicatorSnapshot, SourceError> {
        let body = self
            .fetcher
            .fetch_text(MARGIN_URL, &[("response", "json"), ("selectType", "MS")])
            .await?;
        let reading = parse_margin(&body)?;

        let mut snapshot = IndicatorSnapshot::new(self.key(), reading.balance, reading.change, "twse");
        let previous = reading.balance - reading.change;
        if previous > 0.0 {
            snapshot.change_percent = Some(round2(reading.change / previous * 100.0));
        }
        // the summary endpoint only reports today's balance
        snapshot.history = synthetic_history(
            reading.balance,
            50.0,
            SYNTHETIC_DAYS,
            Utc::now().date_naive(),
            &mut rand::rng(),
        );
        Ok(snapshot)
    }
}
