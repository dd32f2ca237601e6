mod aggregator;
mod analyzer;
mod config;
mod model;
mod normalizer;
mod parser;
mod scraper;
mod service;
mod sources;
mod storage;
mod synthetic;
mod utils;

use aggregator::Aggregator;
use analyzer::AnalyzerImpl;
use config::{load_config, AppConfig};
use model::IndicatorKey;
use scraper::HttpFetcher;
use service::MarketDataService;
use sources::default_sources;
use storage::DataCache;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let fetcher = match HttpFetcher::new(
        &config.user_agent,
        Duration::from_secs(config.request_timeout_seconds),
    ) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    let cache = Arc::new(DataCache::new());
    let aggregator = Aggregator::new(
        default_sources(&fetcher, &config),
        cache.clone(),
        Duration::from_secs(config.cache_ttl_seconds),
    );
    let service = MarketDataService::new(aggregator, AnalyzerImpl::new());

    info!("🚀 Market gauge started");

    // Main processing loop
    loop {
        report(&service).await;
        info!("Cached sources ({}): {}", cache.size(), cache.keys().join(", "));

        info!("Waiting for timer ({}s) or Ctrl-C...", config.check_interval_seconds);
        tokio::select! {
            _ = sleep(Duration::from_secs(config.check_interval_seconds)) => {
                info!("Timer triggered.");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down.");
                break;
            }
        }
    }
}

/// Runs one aggregation pass and logs every indicator plus the derived signals.
async fn report(service: &MarketDataService) {
    let snapshot = match service.all_indicators().await {
        Ok(s) => s,
        Err(e) => {
            warn!("Aggregation failed: {}", e);
            return;
        }
    };

    for key in IndicatorKey::ALL {
        if let Some(ind) = snapshot.get(key) {
            let pct = ind
                .change_percent
                .map(|p| format!(" ({:+.2}%)", p))
                .unwrap_or_default();
            info!(
                "{:<26} {:>12.2} {:+.2}{} {} [{}]",
                ind.name,
                ind.value,
                ind.change,
                pct,
                ind.unit.as_deref().unwrap_or(""),
                ind.source
            );
        }
    }

    match service.market_status().await {
        Ok(status) => {
            info!(
                "📊 Sentiment: {:?} | Trend: {:?} | Volatility: {:?}",
                status.overall_sentiment, status.market_trend, status.volatility
            );
            for signal in &status.bullish_signals {
                info!("  + {}", signal);
            }
            for signal in &status.risk_signals {
                info!("  - {}", signal);
            }
        }
        Err(e) => warn!("Market status failed: {}", e),
    }

    match service.indicator_detail(IndicatorKey::TaiexIndex.as_str()).await {
        Ok(detail) => info!(
            "{} MA10 {} from {} at {}",
            detail.key,
            detail
                .snapshot
                .latest_moving_average()
                .map(|ma| format!("{:.2}", ma))
                .unwrap_or_else(|| "n/a".to_string()),
            detail.snapshot.source,
            detail.last_updated.format("%H:%M:%S")
        ),
        Err(e) => warn!("TAIEX detail failed: {}", e),
    }

    match service.summary_stats(IndicatorKey::TaiexIndex.as_str(), None).await {
        Ok(stats) => info!(
            "TAIEX 30d: min {:.2} max {:.2} avg {:.2} ({:+.2}%)",
            stats.min, stats.max, stats.avg, stats.change_percent
        ),
        Err(e) => warn!("Summary failed: {}", e),
    }

    match serde_json::to_string(&snapshot) {
        Ok(json) => tracing::debug!("Snapshot: {}", json),
        Err(e) => warn!("Snapshot serialization failed: {}", e),
    }
}
