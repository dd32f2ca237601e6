// Hardcoded substitutes for indicators whose live fetch failed.
use crate::analyzer::sentiment::VolatilityBand;
use crate::model::{IndicatorKey, IndicatorSnapshot};
use crate::sources::cnn::fear_greed_snapshot;
use crate::synthetic::{synthetic_history, SYNTHETIC_DAYS};
use chrono::Utc;
use rand::Rng;

pub const FALLBACK_SOURCE: &str = "fallback";

struct FallbackDefault {
    value: f64,
    change: f64,
    change_percent: Option<f64>,
    /// Step size of the synthetic history.
    volatility: f64,
}

fn defaults_for(key: IndicatorKey) -> FallbackDefault {
    let (value, change, change_percent, volatility) = match key {
        IndicatorKey::TaiexIndex => (30810.58, -129.95, Some(-0.42), 500.0),
        IndicatorKey::VixIndex => (15.39, -1.36, Some(-8.11), 3.0),
        IndicatorKey::CnnFearGreedIndex => (62.0, 0.0, None, 15.0),
        IndicatorKey::TaiwanVix => (22.67, 0.04, Some(0.18), 2.0),
        IndicatorKey::MarginBalance => (3593.0, 8.5, Some(0.24), 50.0),
        IndicatorKey::MarginMaintainRate => (170.23, 0.0, None, 8.0),
        IndicatorKey::CrudeOil => (78.5, 0.0, None, 2.0),
        IndicatorKey::Gold => (2350.0, 0.0, None, 25.0),
        IndicatorKey::DollarIndex => (104.2, 0.0, None, 0.5),
        IndicatorKey::UsTenYearBond => (4.25, 0.0, None, 0.05),
        IndicatorKey::TwdUsdRate => (0.031, 0.0, None, 0.0002),
    };
    FallbackDefault {
        value,
        change,
        change_percent,
        volatility,
    }
}

/// Fixed default for `key` with a fresh synthetic 30-point history.
pub fn fallback_snapshot<R: Rng>(key: IndicatorKey, rng: &mut R) -> IndicatorSnapshot {
    let d = defaults_for(key);
    if key == IndicatorKey::CnnFearGreedIndex {
        return fear_greed_snapshot(d.value, FALLBACK_SOURCE, rng);
    }

    let mut snapshot = IndicatorSnapshot::new(key, d.value, d.change, FALLBACK_SOURCE);
    snapshot.change_percent = d.change_percent;
    if key == IndicatorKey::TaiwanVix {
        snapshot.label = Some(VolatilityBand::from_level(d.value).to_string());
    }
    snapshot.history = synthetic_history(
        d.value,
        d.volatility,
        SYNTHETIC_DAYS,
        Utc::now().date_naive(),
        rng,
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_key_has_a_positive_default() {
        let mut rng = StdRng::seed_from_u64(11);
        for key in IndicatorKey::ALL {
            let snapshot = fallback_snapshot(key, &mut rng);
            assert_eq!(snapshot.key, key);
            assert!(snapshot.value > 0.0, "{}", key);
            assert_eq!(snapshot.source, FALLBACK_SOURCE);
            assert_eq!(snapshot.history.len(), SYNTHETIC_DAYS);
        }
    }

    #[test]
    fn labelled_defaults() {
        let mut rng = StdRng::seed_from_u64(12);
        let fng = fallback_snapshot(IndicatorKey::CnnFearGreedIndex, &mut rng);
        assert_eq!(fng.value, 62.0);
        assert_eq!(fng.label.as_deref(), Some("Greed"));

        let vix = fallback_snapshot(IndicatorKey::TaiwanVix, &mut rng);
        assert_eq!(vix.label.as_deref(), Some("Elevated"));
        assert_eq!(fallback_snapshot(IndicatorKey::MarginMaintainRate, &mut rng).value, 170.23);
    }
}
