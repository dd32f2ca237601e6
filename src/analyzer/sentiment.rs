use serde::Serialize;
use std::fmt;

/// Five-bucket reading of a 0..=100 fear & greed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FearGreedLevel {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl FearGreedLevel {
    /// Breakpoints: ≤25, ≤45, ≤55, ≤75, above.
    pub fn from_score(score: f64) -> Self {
        if score <= 25.0 {
            Self::ExtremeFear
        } else if score <= 45.0 {
            Self::Fear
        } else if score <= 55.0 {
            Self::Neutral
        } else if score <= 75.0 {
            Self::Greed
        } else {
            Self::ExtremeGreed
        }
    }
}

impl fmt::Display for FearGreedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtremeFear => write!(f, "Extreme Fear"),
            Self::Fear => write!(f, "Fear"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Greed => write!(f, "Greed"),
            Self::ExtremeGreed => write!(f, "Extreme Greed"),
        }
    }
}

/// Bands for a volatility index level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum VolatilityBand {
    Calm,
    Normal,
    Elevated,
    Panic,
}

impl VolatilityBand {
    pub fn from_level(level: f64) -> Self {
        if level <= 15.0 {
            Self::Calm
        } else if level <= 20.0 {
            Self::Normal
        } else if level <= 30.0 {
            Self::Elevated
        } else {
            Self::Panic
        }
    }
}

impl fmt::Display for VolatilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calm => write!(f, "Calm"),
            Self::Normal => write!(f, "Normal"),
            Self::Elevated => write!(f, "Elevated"),
            Self::Panic => write!(f, "Panic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fear_greed_examples() {
        assert_eq!(FearGreedLevel::from_score(10.0), FearGreedLevel::ExtremeFear);
        assert_eq!(FearGreedLevel::from_score(62.0), FearGreedLevel::Greed);
        assert_eq!(FearGreedLevel::from_score(62.0).to_string(), "Greed");
    }

    #[test]
    fn fear_greed_breakpoints_are_inclusive() {
        assert_eq!(FearGreedLevel::from_score(25.0), FearGreedLevel::ExtremeFear);
        assert_eq!(FearGreedLevel::from_score(26.0), FearGreedLevel::Fear);
        assert_eq!(FearGreedLevel::from_score(45.0), FearGreedLevel::Fear);
        assert_eq!(FearGreedLevel::from_score(55.0), FearGreedLevel::Neutral);
        assert_eq!(FearGreedLevel::from_score(75.0), FearGreedLevel::Greed);
        assert_eq!(FearGreedLevel::from_score(76.0), FearGreedLevel::ExtremeGreed);
    }

    #[test]
    fn fear_greed_is_monotonic() {
        let levels: Vec<FearGreedLevel> = (0..=100).map(|s| FearGreedLevel::from_score(s as f64)).collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn volatility_bands() {
        assert_eq!(VolatilityBand::from_level(12.0), VolatilityBand::Calm);
        assert_eq!(VolatilityBand::from_level(20.0), VolatilityBand::Normal);
        assert_eq!(VolatilityBand::from_level(22.67), VolatilityBand::Elevated);
        assert_eq!(VolatilityBand::from_level(41.0), VolatilityBand::Panic);
    }
}
