use crate::analyzer::moving_average::trailing_mean;
use crate::analyzer::sentiment::FearGreedLevel;
use crate::model::{AggregatedSnapshot, IndicatorKey};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fixed thresholds the signal predicates compare against.
#[derive(Debug, Clone)]
pub struct Thresholds {
    pub monthly_period: usize,
    pub quarterly_period: usize,
    pub vix_calm: f64,
    pub vix_stress: f64,
    pub fear_greed_optimism: f64,
    pub taiwan_vix_elevated: f64,
    /// Margin maintenance ratio below which brokers issue margin calls.
    pub maintenance_safety_line: f64,
    pub maintenance_buffer: f64,
    /// Margin balance in 億 considered crowded.
    pub margin_balance_high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            monthly_period: 20,
            quarterly_period: 60,
            vix_calm: 20.0,
            vix_stress: 30.0,
            fear_greed_optimism: 50.0,
            taiwan_vix_elevated: 20.0,
            maintenance_safety_line: 160.0,
            maintenance_buffer: 10.0,
            margin_balance_high: 3500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallSentiment {
    Positive,
    Cautious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Bullish,
    Bearish,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    Low,
    High,
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    pub bullish_signals: Vec<String>,
    pub risk_signals: Vec<String>,
    pub overall_sentiment: OverallSentiment,
    pub market_trend: MarketTrend,
    pub volatility: VolatilityLevel,
    pub last_updated: DateTime<Utc>,
}

/// Trait defining the interface for a snapshot analyzer.
pub trait Analyzer {
    fn market_status(&self, snapshot: &AggregatedSnapshot) -> MarketStatus;
}

/// Threshold-based implementation of the analyzer.
pub struct AnalyzerImpl {
    thresholds: Thresholds,
}

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    fn bullish_signals(&self, snapshot: &AggregatedSnapshot) -> Vec<String> {
        let t = &self.thresholds;
        let mut signals = Vec::new();

        if let Some(taiex) = snapshot.get(IndicatorKey::TaiexIndex) {
            if trailing_mean(&taiex.history, t.monthly_period).is_some_and(|ma| taiex.value > ma) {
                signals.push("TAIEX is above its monthly average".to_string());
            }
            if trailing_mean(&taiex.history, t.quarterly_period).is_some_and(|ma| taiex.value > ma) {
                signals.push("TAIEX is above its quarterly average".to_string());
            }
        }
        if snapshot.value_of(IndicatorKey::VixIndex).is_some_and(|v| v < t.vix_calm) {
            signals.push(format!("VIX is below {}, risk sentiment is stable", t.vix_calm));
        }
        if snapshot
            .value_of(IndicatorKey::CnnFearGreedIndex)
            .is_some_and(|v| v > t.fear_greed_optimism)
        {
            signals.push("CNN Fear & Greed shows optimism".to_string());
        }
        if snapshot
            .value_of(IndicatorKey::MarginMaintainRate)
            .is_some_and(|v| v > t.maintenance_safety_line)
        {
            signals.push("Margin maintenance ratio is above the safety line".to_string());
        }

        signals
    }

    fn risk_signals(&self, snapshot: &AggregatedSnapshot) -> Vec<String> {
        let t = &self.thresholds;
        let mut signals = Vec::new();

        if snapshot
            .value_of(IndicatorKey::TaiwanVix)
            .is_some_and(|v| v > t.taiwan_vix_elevated)
        {
            signals.push("Taiwan VIX is elevated".to_string());
        }
        if snapshot.value_of(IndicatorKey::VixIndex).is_some_and(|v| v > t.vix_stress) {
            signals.push(format!("VIX is above {}, markets are under stress", t.vix_stress));
        }
        if snapshot
            .value_of(IndicatorKey::MarginMaintainRate)
            .is_some_and(|v| v < t.maintenance_safety_line + t.maintenance_buffer)
        {
            signals.push("Margin maintenance ratio is close to the safety line".to_string());
        }
        if snapshot
            .value_of(IndicatorKey::MarginBalance)
            .is_some_and(|v| v > t.margin_balance_high)
        {
            signals.push("Margin balance is at a high level".to_string());
        }
        if snapshot
            .value_of(IndicatorKey::CnnFearGreedIndex)
            .is_some_and(|v| FearGreedLevel::from_score(v) == FearGreedLevel::ExtremeGreed)
        {
            signals.push("CNN Fear & Greed shows extreme greed".to_string());
        }

        signals
    }

    fn market_trend(&self, snapshot: &AggregatedSnapshot) -> MarketTrend {
        let Some(taiex) = snapshot.get(IndicatorKey::TaiexIndex) else {
            return MarketTrend::Unknown;
        };
        match taiex.latest_moving_average() {
            Some(ma) if taiex.value > ma => MarketTrend::Bullish,
            Some(_) => MarketTrend::Bearish,
            None => MarketTrend::Unknown,
        }
    }

    fn volatility(&self, snapshot: &AggregatedSnapshot) -> VolatilityLevel {
        match snapshot.value_of(IndicatorKey::VixIndex) {
            Some(v) if v < self.thresholds.vix_calm => VolatilityLevel::Low,
            Some(_) => VolatilityLevel::High,
            None => VolatilityLevel::Unknown,
        }
    }
}

impl Default for AnalyzerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for AnalyzerImpl {
    fn market_status(&self, snapshot: &AggregatedSnapshot) -> MarketStatus {
        let bullish_signals = self.bullish_signals(snapshot);
        let risk_signals = self.risk_signals(snapshot);
        let overall_sentiment = if bullish_signals.len() > risk_signals.len() {
            OverallSentiment::Positive
        } else {
            OverallSentiment::Cautious
        };

        MarketStatus {
            market_trend: self.market_trend(snapshot),
            volatility: self.volatility(snapshot),
            bullish_signals,
            risk_signals,
            overall_sentiment,
            last_updated: snapshot.last_updated,
        }
    }
}
