// wantgoo VIXTWN adapter
use crate::analyzer::sentiment::VolatilityBand;
use crate::model::{IndicatorKey, IndicatorSnapshot, SourceError};
use crate::parser::parse_taiwan_vix;
use crate::scraper::{HttpFetcher, IndicatorSource};
use crate::synthetic::{synthetic_history, SYNTHETIC_DAYS};
use chrono::Utc;

const VIXTWN_URL: &str = "https://www.wantgoo.com/index/vixtwn";

pub struct TaiwanVixSource {
    fetcher: HttpFetcher,
}

impl TaiwanVixSource {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait::async_trait]
impl IndicatorSource for TaiwanVixSource {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::TaiwanVix
    }

    fn cache_key(&self) -> String {
        "wantgoo:vixtwn".to_string()
    }

    async fn fetch(&self) -> Result<IndicatorSnapshot, SourceError> {
        let html = self.fetcher.fetch_text(VIXTWN_URL, &[]).await?;
        let reading = parse_taiwan_vix(&html)?;

        let mut snapshot = IndicatorSnapshot::new(self.key(), reading.value, reading.change, "wantgoo");
        snapshot.change_percent = Some(reading.change_percent);
        snapshot.label = Some(VolatilityBand::from_level(reading.value).to_string());
        snapshot.history = synthetic_history(
            reading.value,
            2.0,
            SYNTHETIC_DAYS,
            Utc::now().date_naive(),
            &mut rand::rng(),
        );
        Ok(snapshot)
    }
}
