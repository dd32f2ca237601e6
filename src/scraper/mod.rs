// HTTP access and the source abstraction the aggregator works against.

pub mod fetcher;
pub mod traits;

pub use fetcher::HttpFetcher;
pub use traits::IndicatorSource;
