use crate::model::HistoryPoint;
use crate::utils::round2;

pub const MA10_WINDOW: usize = 10;

/// Attaches the trailing 10-point mean to every point: the window for index
/// `i` is `[max(0, i-9), i]`, so the first points average fewer values.
pub fn annotate_ma10(history: &mut [HistoryPoint]) {
    for i in 0..history.len() {
        let start = (i + 1).saturating_sub(MA10_WINDOW);
        let window = &history[start..=i];
        let mean = window.iter().map(|p| p.value).sum::<f64>() / window.len() as f64;
        history[i].moving_average_10 = Some(round2(mean));
    }
}

/// Mean of the last `period` values. `None` until the history holds a full period.
pub fn trailing_mean(history: &[HistoryPoint], period: usize) -> Option<f64> {
    if period == 0 || history.len() < period {
        return None;
    }
    let start = history.len().saturating_sub(period);
    let slice = &history[start..];
    Some(slice.iter().map(|p| p.value).sum::<f64>() / slice.len() as f64)
}
