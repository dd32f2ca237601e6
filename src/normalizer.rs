use crate::model::{HistoryPoint, IndicatorSnapshot};

/// Puts a snapshot's history into ascending date order with one point per day.
pub fn normalize_snapshot(snapshot: &mut IndicatorSnapshot) {
    normalize_history(&mut snapshot.history);
}

fn normalize_history(history: &mut Vec<HistoryPoint>) {
    history.retain(|p| p.value.is_finite());
    // stable sort keeps the source order within a day, so the later quote wins below
    history.sort_by_key(|p| p.date);

    let mut deduped: Vec<HistoryPoint> = Vec::with_capacity(history.len());
    for point in history.drain(..) {
        match deduped.last_mut() {
            Some(last) if last.date == point.date => *last = point,
            _ => deduped.push(point),
        }
    }
    *history = deduped;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IndicatorKey;
    use chrono::NaiveDate;

    fn point(day: u32, value: f64) -> HistoryPoint {
        HistoryPoint::new(NaiveDate::from_ymd_opt(2024, 6, day).unwrap(), value)
    }

    #[test]
    fn sorts_dedupes_and_drops_non_finite() {
        let mut snapshot = IndicatorSnapshot::new(IndicatorKey::Gold, 2350.0, 0.0, "test");
        snapshot.history = vec![
            point(3, 3.0),
            point(1, 1.0),
            point(2, f64::NAN),
            point(3, 3.5),
            point(2, 2.0),
        ];
        normalize_snapshot(&mut snapshot);

        let values: Vec<f64> = snapshot.history.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.5]);
        assert!(snapshot.history.windows(2).all(|w| w[0].date < w[1].date));
    }
}
