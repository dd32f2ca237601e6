// Utility functions
use chrono::{DateTime, NaiveDate, Utc};

/// Rounds to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parses a number such as "1,234.56" or "+0.18".
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '+')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Converts a unix timestamp in seconds into a UTC calendar date.
pub fn date_from_unix(secs: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(104.499), 104.5);
        assert_eq!(round2(-0.426), -0.43);
    }

    #[test]
    fn parses_grouped_numbers() {
        assert_eq!(parse_number("1,234.56"), Some(1234.56));
        assert_eq!(parse_number(" +0.18 "), Some(0.18));
        assert_eq!(parse_number("n/a"), None);
    }

    #[test]
    fn converts_unix_seconds() {
        assert_eq!(date_from_unix(0), NaiveDate::from_ymd_opt(1970, 1, 1));
    }
}
