// wantgoo VIXTWN page scraping
use crate::model::SourceError;
use crate::parser::text::{decimal_after, decimal_percent_pair, html_to_text};

const MARKER: &str = "VIXTWN";

#[derive(Debug, Clone, PartialEq)]
pub struct VixReading {
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Value is the first decimal after the VIXTWN marker. Change and change
/// percent default to zero when the page does not show them.
pub fn parse_taiwan_vix(html: &str) -> Result<VixReading, SourceError> {
    let text = html_to_text(html);
    let value = decimal_after(&text, MARKER)
        .filter(|v| *v > 0.0)
        .ok_or_else(|| SourceError::Parse("VIXTWN value not found".into()))?;

    let tail = text.find(MARKER).map(|idx| &text[idx..]).unwrap_or(&text);
    let (change, change_percent) = decimal_percent_pair(tail).unwrap_or((0.0, 0.0));

    Ok(VixReading {
        value,
        change,
        change_percent,
    })
}
