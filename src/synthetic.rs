// Random-walk histories for sources that only publish a current value.
use crate::model::HistoryPoint;
use crate::utils::round2;
use chrono::{Duration, NaiveDate};
use rand::Rng;

pub const SYNTHETIC_DAYS: usize = 30;

/// `days` daily points ending at `end`. Each step moves by
/// `(u - 0.5) * volatility` with `u` uniform in [0, 1), floored at 70 % of `base`.
pub fn synthetic_history<R: Rng + ?Sized>(
    base: f64,
    volatility: f64,
    days: usize,
    end: NaiveDate,
    rng: &mut R,
) -> Vec<HistoryPoint> {
    let floor = base * 0.7;
    let mut value = base;
    (0..days)
        .rev()
        .map(|offset| {
            let u: f64 = rng.random();
            value = (value + (u - 0.5) * volatility).max(floor);
            HistoryPoint::new(end - Duration::days(offset as i64), round2(value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn thirty_ascending_points_ending_today() {
        let mut rng = StdRng::seed_from_u64(7);
        let history = synthetic_history(100.0, 5.0, SYNTHETIC_DAYS, end(), &mut rng);
        assert_eq!(history.len(), 30);
        assert_eq!(history.last().unwrap().date, end());
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn never_drops_below_floor() {
        let mut rng = StdRng::seed_from_u64(1);
        let history = synthetic_history(10.0, 50.0, 200, end(), &mut rng);
        assert!(history.iter().all(|p| p.value >= 7.0));
    }

    #[test]
    fn zero_volatility_is_flat() {
        let mut rng = StdRng::seed_from_u64(3);
        let history = synthetic_history(42.5, 0.0, 5, end(), &mut rng);
        assert!(history.iter().all(|p| p.value == 42.5));
    }

    #[test]
    fn same_seed_same_series() {
        let a = synthetic_history(50.0, 3.0, 10, end(), &mut StdRng::seed_from_u64(9));
        let b = synthetic_history(50.0, 3.0, 10, end(), &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
