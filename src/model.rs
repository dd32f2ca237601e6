// Core structs: IndicatorKey, IndicatorSnapshot, AggregatedSnapshot
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every indicator the dashboard tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndicatorKey {
    TaiexIndex,
    VixIndex,
    CnnFearGreedIndex,
    #[serde(rename = "taiwanVixIndex")]
    TaiwanVix,
    MarginBalance,
    MarginMaintainRate,
    CrudeOil,
    Gold,
    DollarIndex,
    UsTenYearBond,
    TwdUsdRate,
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; 11] = [
        IndicatorKey::TaiexIndex,
        IndicatorKey::VixIndex,
        IndicatorKey::CnnFearGreedIndex,
        IndicatorKey::TaiwanVix,
        IndicatorKey::MarginBalance,
        IndicatorKey::MarginMaintainRate,
        IndicatorKey::CrudeOil,
        IndicatorKey::Gold,
        IndicatorKey::DollarIndex,
        IndicatorKey::UsTenYearBond,
        IndicatorKey::TwdUsdRate,
    ];

    /// Wire key, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaiexIndex => "taiexIndex",
            Self::VixIndex => "vixIndex",
            Self::CnnFearGreedIndex => "cnnFearGreedIndex",
            Self::TaiwanVix => "taiwanVixIndex",
            Self::MarginBalance => "marginBalance",
            Self::MarginMaintainRate => "marginMaintainRate",
            Self::CrudeOil => "crudeOil",
            Self::Gold => "gold",
            Self::DollarIndex => "dollarIndex",
            Self::UsTenYearBond => "usTenYearBond",
            Self::TwdUsdRate => "twdUsdRate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TaiexIndex => "TAIEX",
            Self::VixIndex => "VIX",
            Self::CnnFearGreedIndex => "CNN Fear & Greed",
            Self::TaiwanVix => "Taiwan VIX",
            Self::MarginBalance => "Margin Balance",
            Self::MarginMaintainRate => "Margin Maintenance Ratio",
            Self::CrudeOil => "Crude Oil",
            Self::Gold => "Gold",
            Self::DollarIndex => "US Dollar Index",
            Self::UsTenYearBond => "US 10Y Treasury",
            Self::TwdUsdRate => "TWD/USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::TaiexIndex => "^TWII",
            Self::VixIndex => "^VIX",
            Self::CnnFearGreedIndex => "FEAR_GREED",
            Self::TaiwanVix => "VIXTWN",
            Self::MarginBalance => "MARGIN_BALANCE",
            Self::MarginMaintainRate => "MARGIN_MAINTAIN_RATE",
            Self::CrudeOil => "CL=F",
            Self::Gold => "GC=F",
            Self::DollarIndex => "DX-Y.NYB",
            Self::UsTenYearBond => "^TNX",
            Self::TwdUsdRate => "TWDUSD=X",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Self::MarginBalance => Some("億"),
            Self::MarginMaintainRate | Self::UsTenYearBond => Some("%"),
            Self::CrudeOil => Some("USD/bbl"),
            Self::Gold => Some("USD/oz"),
            Self::TwdUsdRate => Some("TWD/USD"),
            _ => None,
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorKey {
    type Err = MarketError;

    /// Accepts the wire key or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        IndicatorKey::ALL
            .iter()
            .copied()
            .find(|k| {
                k.as_str().eq_ignore_ascii_case(needle) || k.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| MarketError::IndicatorNotFound(needle.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    /// "MM/DD" label used by charts.
    pub day: String,
    pub date: NaiveDate,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_average_10: Option<f64>,
}

impl HistoryPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            day: date.format("%m/%d").to_string(),
            date,
            value,
            moving_average_10: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub key: IndicatorKey,
    pub name: String,
    pub symbol: String,
    pub value: f64,
    pub change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub history: Vec<HistoryPoint>,
    pub source: String,
}

impl IndicatorSnapshot {
    /// Snapshot with name, symbol and unit taken from the key.
    pub fn new(key: IndicatorKey, value: f64, change: f64, source: &str) -> Self {
        Self {
            key,
            name: key.display_name().to_string(),
            symbol: key.symbol().to_string(),
            value,
            change,
            change_percent: None,
            unit: key.unit().map(str::to_string),
            label: None,
            history: Vec::new(),
            source: source.to_string(),
        }
    }

    pub fn latest_moving_average(&self) -> Option<f64> {
        self.history.last().and_then(|p| p.moving_average_10)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSnapshot {
    pub indicators: BTreeMap<IndicatorKey, IndicatorSnapshot>,
    pub fallback_used: Vec<IndicatorKey>,
    pub last_updated: DateTime<Utc>,
}

impl AggregatedSnapshot {
    pub fn get(&self, key: IndicatorKey) -> Option<&IndicatorSnapshot> {
        self.indicators.get(&key)
    }

    pub fn value_of(&self, key: IndicatorKey) -> Option<f64> {
        self.get(key).map(|s| s.value)
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("source task panicked")]
    Panicked,
}

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("indicator not found: {0}")]
    IndicatorNotFound(String),
    #[error("days must be between 1 and 365, got {0}")]
    InvalidDays(u32),
    #[error("aggregation failed: {0}")]
    Aggregation(String),
}
