// Analyzer module: moving averages, classification and market status signals.

pub mod market_status;
pub mod moving_average;
pub mod sentiment;
pub mod stats;

pub use market_status::{Analyzer, AnalyzerImpl, MarketStatus};
