// CNN Fear & Greed adapter
use crate::analyzer::sentiment::FearGreedLevel;
use crate::model::{IndicatorKey, IndicatorSnapshot, SourceError};
use crate::parser::parse_fear_greed;
use crate::scraper::{HttpFetcher, IndicatorSource};
use crate::synthetic::{synthetic_history, SYNTHETIC_DAYS};
use chrono::Utc;

const FEAR_GREED_URL: &str = "https://www.cnn.com/markets/fear-and-greed";

pub struct CnnFearGreedSource {
    fetcher: HttpFetcher,
}

impl CnnFearGreedSource {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }
}

/// Builds the snapshot for a 0..=100 score, shared with the fallback path.
pub fn fear_greed_snapshot(score: f64, source: &str, history_seed: &mut impl rand::Rng) -> IndicatorSnapshot {
    let mut snapshot = IndicatorSnapshot::new(IndicatorKey::CnnFearGreedIndex, score, 0.0, source);
    snapshot.label = Some(FearGreedLevel::from_score(score).to_string());
    snapshot.history = synthetic_history(score, 15.0, SYNTHETIC_DAYS, Utc::now().date_naive(), history_seed);
    for point in snapshot.history.iter_mut() {
        point.value = point.value.clamp(0.0, 100.0);
    }
    snapshot
}

#[async_trait::async_trait]
impl IndicatorSource for CnnFearGreedSource {
    fn key(&self) -> IndicatorKey {
        IndicatorKey::CnnFearGreedIndex
    }

    fn cache_key(&self) -> String {
        "cnn:fear-greed".to_string()
    }

    async fn fetch(&self) -> Result<IndicatorSnapshot, SourceError> {
        let html = self.fetcher.fetch_text(FEAR_GREED_URL, &[]).await?;
        let score = parse_fear_greed(&html)?;
        Ok(fear_greed_snapshot(f64::from(score), "cnn", &mut rand::rng()))
    }
}
