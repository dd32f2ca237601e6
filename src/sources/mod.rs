// Source adapters: one per external feed.

pub mod cnn;
pub mod margin_ratio;
pub mod taiwan_vix;
pub mod twse;
pub mod yahoo;

use crate::config::AppConfig;
use crate::model::IndicatorKey;
use crate::scraper::{HttpFetcher, IndicatorSource};
use std::sync::Arc;

pub use cnn::CnnFearGreedSource;
pub use margin_ratio::MarginRatioSource;
pub use taiwan_vix::TaiwanVixSource;
pub use twse::TwseMarginSource;
pub use yahoo::YahooChartSource;

/// Keys served by the Yahoo chart API.
const QUOTE_KEYS: [IndicatorKey; 7] = [
    IndicatorKey::TaiexIndex,
    IndicatorKey::VixIndex,
    IndicatorKey::CrudeOil,
    IndicatorKey::Gold,
    IndicatorKey::DollarIndex,
    IndicatorKey::UsTenYearBond,
    IndicatorKey::TwdUsdRate,
];

/// Builds one live source per indicator.
pub fn default_sources(fetcher: &HttpFetcher, config: &AppConfig) -> Vec<Arc<dyn IndicatorSource>> {
    let mut sources: Vec<Arc<dyn IndicatorSource>> = QUOTE_KEYS
        .iter()
        .map(|key| {
            Arc::new(YahooChartSource::new(fetcher.clone(), *key, config.history_days))
                as Arc<dyn IndicatorSource>
        })
        .collect();

    sources.push(Arc::new(CnnFearGreedSource::new(fetcher.clone())));
    sources.push(Arc::new(TaiwanVixSource::new(fetcher.clone())));
    sources.push(Arc::new(TwseMarginSource::new(fetcher.clone())));
    sources.push(Arc::new(MarginRatioSource::new(config.margin_maintenance_ratio)));
    sources
}
