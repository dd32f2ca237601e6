use crate::model::HistoryPoint;
use crate::utils::round2;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub latest: f64,
    /// From the first to the last point of the window.
    pub change_percent: f64,
    pub count: usize,
}

/// Calculates min/max/avg/latest over a window. `None` for an empty window.
pub fn summarize(window: &[HistoryPoint]) -> Option<SummaryStats> {
    let first = window.first()?.value;
    let latest = window.last()?.value;

    let min = window.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = window.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    let avg = window.iter().map(|p| p.value).sum::<f64>() / window.len() as f64;
    let change_percent = if first != 0.0 {
        round2((latest - first) / first * 100.0)
    } else {
        0.0
    };

    Some(SummaryStats {
        min,
        max,
        avg: round2(avg),
        latest,
        change_percent,
        count: window.len(),
    })
}
