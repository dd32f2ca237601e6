// Aggregator: concurrent fetch of every source with per-source fallback.

pub mod fallback;

use crate::analyzer::moving_average::annotate_ma10;
use crate::model::{AggregatedSnapshot, IndicatorKey, IndicatorSnapshot, MarketError, SourceError};
use crate::normalizer::normalize_snapshot;
use crate::scraper::IndicatorSource;
use crate::storage::DataCache;
use chrono::{DateTime, Utc};
use fallback::fallback_snapshot;
use futures::future::join_all;
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Settled result of one source call.
pub type SourceOutcome = (IndicatorKey, Result<IndicatorSnapshot, SourceError>);

pub struct Aggregator {
    sources: Vec<Arc<dyn IndicatorSource>>,
    cache: Arc<DataCache<IndicatorSnapshot>>,
    ttl: Duration,
}

impl Aggregator {
    pub fn new(
        sources: Vec<Arc<dyn IndicatorSource>>,
        cache: Arc<DataCache<IndicatorSnapshot>>,
        ttl: Duration,
    ) -> Self {
        Self { sources, cache, ttl }
    }

    /// Fetches every indicator. Always complete: failed sources are replaced by
    /// fallback data. Only a cancelled task makes the whole pass fail.
    pub async fn collect_all(&self) -> Result<AggregatedSnapshot, MarketError> {
        let outcomes = self.settle(&self.sources).await?;
        let snapshot = assemble(outcomes, Utc::now(), &mut rand::rng());

        if snapshot.fallback_used.is_empty() {
            info!("All {} indicators fetched live", snapshot.indicators.len());
        } else {
            let keys: Vec<&str> = snapshot.fallback_used.iter().map(|k| k.as_str()).collect();
            warn!("Using fallback data for: {}", keys.join(", "));
        }
        Ok(snapshot)
    }

    /// Fetches a single indicator with the same fallback and annotation.
    pub async fn collect_one(&self, key: IndicatorKey) -> Result<IndicatorSnapshot, MarketError> {
        let sources: Vec<Arc<dyn IndicatorSource>> = self
            .sources
            .iter()
            .filter(|s| s.key() == key)
            .cloned()
            .collect();
        let outcome = self.settle(&sources).await?.into_iter().next();

        let mut rng = rand::rng();
        let (mut snapshot, used_fallback) = match outcome {
            Some(outcome) => resolve(outcome, &mut rng),
            None => (fallback_snapshot(key, &mut rng), true),
        };
        if used_fallback {
            warn!("Using fallback data for: {}", key);
        }
        annotate_ma10(&mut snapshot.history);
        Ok(snapshot)
    }

    /// Runs each source in its own task through the cache and waits for all of them.
    async fn settle(&self, sources: &[Arc<dyn IndicatorSource>]) -> Result<Vec<SourceOutcome>, MarketError> {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let cache = Arc::clone(&self.cache);
                let ttl = self.ttl;
                tokio::spawn(async move {
                    let cache_key = source.cache_key();
                    cache
                        .get_or_fetch(&cache_key, ttl, move || async move {
                            let mut snapshot = source.fetch().await?;
                            normalize_snapshot(&mut snapshot);
                            Ok::<_, SourceError>(snapshot)
                        })
                        .await
                })
            })
            .collect();

        let joined = join_all(handles).await;

        let mut outcomes = Vec::with_capacity(joined.len());
        for (source, result) in sources.iter().zip(joined) {
            match result {
                Ok(result) => outcomes.push((source.key(), result)),
                Err(e) if e.is_panic() => {
                    warn!("Source {} panicked", source.key());
                    outcomes.push((source.key(), Err(SourceError::Panicked)));
                }
                Err(e) => return Err(MarketError::Aggregation(e.to_string())),
            }
        }
        Ok(outcomes)
    }
}

/// Partitions settled outcomes into live data and failures, substitutes a
/// fallback for every failed or missing key and annotates MA10.
pub fn assemble<R: Rng>(outcomes: Vec<SourceOutcome>, now: DateTime<Utc>, rng: &mut R) -> AggregatedSnapshot {
    let mut indicators = BTreeMap::new();
    let mut fallback_used = Vec::new();

    for outcome in outcomes {
        let key = outcome.0;
        let (snapshot, used_fallback) = resolve(outcome, rng);
        if used_fallback {
            fallback_used.push(key);
        }
        indicators.insert(key, snapshot);
    }

    for key in IndicatorKey::ALL {
        if !indicators.contains_key(&key) {
            indicators.insert(key, fallback_snapshot(key, rng));
            fallback_used.push(key);
        }
    }

    for snapshot in indicators.values_mut() {
        annotate_ma10(&mut snapshot.history);
    }
    fallback_used.sort();
    fallback_used.dedup();

    AggregatedSnapshot {
        indicators,
        fallback_used,
        last_updated: now,
    }
}

fn resolve<R: Rng>((key, result): SourceOutcome, rng: &mut R) -> (IndicatorSnapshot, bool) {
    match result {
        Ok(snapshot) => (snapshot, false),
        Err(e) => {
            warn!("{} fetch failed: {}", key, e);
            (fallback_snapshot(key, rng), true)
        }
    }
}
