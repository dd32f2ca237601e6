// CNN Fear & Greed page scraping
use crate::model::SourceError;
use crate::parser::text::{html_to_text, labelled_integer_after};

const MARKER: &str = "Fear & Greed Index";
/// Word closing the "<value> <label> is driving the US market" sentence.
const TERMINATOR: &str = "driving";

/// Extracts the 0..=100 index value from the CNN markets page.
pub fn parse_fear_greed(html: &str) -> Result<u8, SourceError> {
    let text = html_to_text(html);
    let value = labelled_integer_after(&text, MARKER, TERMINATOR)
        .ok_or_else(|| SourceError::Parse("fear & greed value not found".into()))?;

    u8::try_from(value)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or_else(|| SourceError::Parse(format!("fear & greed value {} out of range", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_index_from_page_text() {
        let html = r#"<html><body>
            <div class="market-fng-gauge__dial-number">
              <h2>Fear &amp; Greed Index</h2>
              <span class="market-fng-gauge__dial-number-value">62</span>
              <span>Greed</span> is driving the US market
            </div></body></html>"#;
        assert_eq!(parse_fear_greed(html).unwrap(), 62);
    }

    #[test]
    fn ignores_timestamps_next_to_the_heading() {
        let html = r#"<div><h2>Fear &amp; Greed Index</h2><span>2 hours ago</span></div>
            <div><h2>Fear &amp; Greed Index</h2><span>44</span> <span>Fear</span> is driving the US market</div>"#;
        assert_eq!(parse_fear_greed(html).unwrap(), 44);
    }

    #[test]
    fn missing_value_is_parse_error() {
        let html = "<html><body><p>Markets are closed</p></body></html>";
        assert!(matches!(parse_fear_greed(html), Err(SourceError::Parse(_))));
    }

    #[test]
    fn rejects_out_of_range_value() {
        let html = "<p>Fear &amp; Greed Index 250 Greed is driving</p>";
        assert!(matches!(parse_fear_greed(html), Err(SourceError::Parse(_))));
    }
}
