use crate::model::{IndicatorKey, IndicatorSnapshot, SourceError};

/// One external data source producing a single indicator.
#[async_trait::async_trait]
pub trait IndicatorSource: Send + Sync {
    fn key(&self) -> IndicatorKey;

    /// Cache key under which a successful result is stored.
    fn cache_key(&self) -> String;

    async fn fetch(&self) -> Result<IndicatorSnapshot, SourceError>;
}
