// Text-level extraction helpers for scraped pages.
use scraper::Html;

/// Flattens an HTML document into its text content with collapsed whitespace.
/// Entities are decoded, so "Fear &amp; Greed" reads as "Fear & Greed".
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let raw = document.root_element().text().collect::<Vec<_>>().join(" ");
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Integer right after any occurrence of `marker`, accepted only when it is
/// followed by one or more alphabetic words and then a word starting with
/// `terminator`, e.g. "Fear & Greed Index 62 Greed is driving".
pub fn labelled_integer_after(text: &str, marker: &str, terminator: &str) -> Option<u32> {
    text.match_indices(marker).find_map(|(idx, _)| {
        let mut tokens = text[idx + marker.len()..].split_whitespace();
        let token = tokens.next()?;
        if !token.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let value = token.parse::<u32>().ok()?;

        let mut label_words = 0;
        for word in tokens {
            if word.starts_with(terminator) {
                return (label_words > 0).then_some(value);
            }
            if !word.chars().all(|c| c.is_ascii_alphabetic()) {
                return None;
            }
            label_words += 1;
        }
        None
    })
}

/// First `<digits>.<digits>` run after any occurrence of `marker`, skipping
/// non-digit characters in between. An occurrence whose first digit run is not
/// a decimal is skipped.
pub fn decimal_after(text: &str, marker: &str) -> Option<f64> {
    text.match_indices(marker).find_map(|(idx, _)| {
        let rest = &text[idx + marker.len()..];
        let start = rest.find(|c: char| c.is_ascii_digit())?;
        let run: String = rest[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        leading_decimal(&run)
    })
}

/// First pair of adjacent tokens shaped like `<decimal> <decimal>%`.
/// A leading minus or down-arrow on a token makes it negative.
pub fn decimal_percent_pair(text: &str) -> Option<(f64, f64)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.windows(2).find_map(|pair| {
        let percent_token = pair[1].strip_suffix('%')?;
        let change = signed_decimal(pair[0])?;
        let percent = signed_decimal(percent_token)?;
        Some((change, percent))
    })
}

fn signed_decimal(token: &str) -> Option<f64> {
    let start = token.find(|c: char| c.is_ascii_digit())?;
    let (prefix, body) = token.split_at(start);
    if !is_decimal(body) {
        return None;
    }
    let value = body.parse::<f64>().ok()?;
    let negative = prefix.ends_with('-') || prefix.contains('▼');
    Some(if negative { -value } else { value })
}

/// Parses the leading `<digits>.<digits>` of `run`, e.g. "22.67." -> 22.67.
fn leading_decimal(run: &str) -> Option<f64> {
    let dot = run.find('.')?;
    let frac_len = run[dot + 1..].chars().take_while(|c| c.is_ascii_digit()).count();
    if dot == 0 || frac_len == 0 {
        return None;
    }
    run[..dot + 1 + frac_len].parse::<f64>().ok()
}

fn is_decimal(s: &str) -> bool {
    match s.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && !frac.is_empty()
                && int.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
