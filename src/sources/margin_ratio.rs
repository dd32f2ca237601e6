// Margin maintenance ratio: configured value, no live feed
use crate::model::{IndicatorKey, IndicatorSnapshot, SourceError};
use crate::scraper::IndicatorSource;
use crate::synthetic::{synthetic_history, SYNTHETIC_DAYS};
use chrono::Utc;

pub struct MarginRatioSource {
    ratio: f64,
}

impl MarginRatioSource {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }
}

#[async_trait::async_trait]
impl IndicatorSource for MarginRatioSource {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::MarginMaintainRate
    }

    fn cache_key(&self) -> String {
        "static:margin-ratio".to_string()
    }

    async fn fetch(&self) -> Result<IndicatorSnapshot, SourceError> {
        let mut snapshot = IndicatorSnapshot::new(self.key(), self.ratio, 0.0, "static");
        snapshot.history = synthetic_history(
            self.ratio,
            8.0,
            SYNTHETIC_DAYS,
            Utc::now().date_naive(),
            &mut rand::rng(),
        );
        Ok(snapshot)
    }
}
