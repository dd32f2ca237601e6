// TWSE margin trading summary parsing
use crate::model::SourceError;
use crate::utils::{parse_number, round2};
use serde_json::Value;

/// Row label of the margin purchase amount, reported in thousand NTD.
const MARGIN_AMOUNT_ROW: &str = "融資金額";
const PREVIOUS_BALANCE_COL: usize = 4;
const TODAY_BALANCE_COL: usize = 5;
/// Thousand NTD per 億 (1e8 NTD).
const THOUSANDS_PER_YI: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MarginReading {
    /// Balance in 億 NTD.
    pub balance: f64,
    pub change: f64,
}

/// Parses the `MI_MARGN` summary: looks through every table (and the legacy
/// top-level `data`) for the margin amount row and reads the previous and
/// current balance columns.
pub fn parse_margin(body: &str) -> Result<MarginReading, SourceError> {
    let json: Value = serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    if let Some(stat) = json.get("stat").and_then(Value::as_str) {
        if !stat.eq_ignore_ascii_case("ok") {
            return Err(SourceError::Parse(format!("TWSE stat: {}", stat)));
        }
    }

    let mut tables: Vec<&Value> = json
        .get("tables")
        .and_then(Value::as_array)
        .map(|t| t.iter().filter_map(|table| table.get("data")).collect())
        .unwrap_or_default();
    if let Some(data) = json.get("data") {
        tables.push(data);
    }

    let row = tables
        .iter()
        .filter_map(|data| data.as_array())
        .flatten()
        .filter_map(Value::as_array)
        .find(|row| {
            row.first()
                .and_then(Value::as_str)
                .is_some_and(|label| label.trim().starts_with(MARGIN_AMOUNT_ROW))
        })
        .ok_or_else(|| SourceError::MissingField(MARGIN_AMOUNT_ROW.into()))?;

    let previous = cell_number(row, PREVIOUS_BALANCE_COL)?;
    let today = cell_number(row, TODAY_BALANCE_COL)?;
    if today <= 0.0 {
        return Err(SourceError::Parse(format!("non-positive margin balance {}", today)));
    }

    Ok(MarginReading {
        balance: round2(today / THOUSANDS_PER_YI),
        change: round2((today - previous) / THOUSANDS_PER_YI),
    })
}

fn cell_number(row: &[Value], col: usize) -> Result<f64, SourceError> {
    let cell = row
        .get(col)
        .ok_or_else(|| SourceError::MissingField(format!("{} column {}", MARGIN_AMOUNT_ROW, col)))?;
    let number = match cell {
        Value::String(s) => parse_number(s),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    number.ok_or_else(|| SourceError::Parse(format!("bad number in column {}: {}", col, cell)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"stat":"OK","date":"20240604","tables":[
        {"title":"信用交易統計","fields":["項目","買進","賣出","現金(券)償還","前日餘額","今日餘額"],
         "data":[["融資(交易單位)","431,520","389,107","6,130","7,802,145","7,838,428"],
                 ["融券(交易單位)","25,021","27,843","1,352","231,778","233,248"],
                 ["融資金額(仟元)","28,934,512","25,120,480","398,112","358,450,000","359,300,000"]]},
        {"title":"融資融券彙總","data":[]}]}"#;

    #[test]
    fn converts_thousands_to_yi() {
        let reading = parse_margin(BODY).unwrap();
        assert_eq!(reading.balance, 3593.0);
        assert_eq!(reading.change, 8.5);
    }

    #[test]
    fn reads_legacy_top_level_data() {
        let body = r#"{"data":[["融資金額(仟元)","0","0","0","100000","250000"]]}"#;
        let reading = parse_margin(body).unwrap();
        assert_eq!(reading, MarginReading { balance: 2.5, change: 1.5 });
    }

    #[test]
    fn non_ok_stat_is_error() {
        let body = r#"{"stat":"很抱歉，沒有符合條件的資料!"}"#;
        assert!(matches!(parse_margin(body), Err(SourceError::Parse(_))));
    }

    #[test]
    fn missing_row_is_missing_field() {
        let body = r#"{"stat":"OK","tables":[{"data":[["融券(交易單位)","1","2","3","4","5"]]}]}"#;
        assert!(matches!(parse_margin(body), Err(SourceError::MissingField(_))));
    }
}
