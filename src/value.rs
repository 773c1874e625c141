const CURRENCY: char = '€';
const MILLIONS: char = 'M';
const THOUSANDS: char = 'K';

/// Market value in millions of euros, parsed from strings like `€91M` or `€575K`.
///
/// Total over all inputs: anything that does not parse (or parses to a
/// negative / non-finite number) yields `0.0`.
pub fn parse_value(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let cleaned = raw.replace(CURRENCY, "");
    let cleaned = cleaned.trim();

    let parsed = if cleaned.contains(MILLIONS) {
        parse_number(&cleaned.replace(MILLIONS, ""))
    } else if cleaned.contains(THOUSANDS) {
        parse_number(&cleaned.replace(THOUSANDS, "")).map(|v| v / 1000.0)
    } else {
        parse_number(cleaned)
    };

    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Display form of a raw value string. Millions get one decimal, thousands none.
pub fn format_currency(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "N/A".to_string();
    };
    let stripped: String = raw
        .chars()
        .filter(|c| *c != CURRENCY && *c != MILLIONS && *c != THOUSANDS)
        .collect();

    if raw.contains(MILLIONS) {
        match parse_number(&stripped) {
            Some(v) => format!("€{v:.1}M"),
            None => "N/A".to_string(),
        }
    } else if raw.contains(THOUSANDS) {
        match parse_number(&stripped) {
            Some(v) => format!("€{v:.0}K"),
            None => "N/A".to_string(),
        }
    } else {
        raw.to_string()
    }
}

pub fn format_millions(total: f64) -> String {
    format!("€{total:.1}M")
}

fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    // `f64::from_str` accepts "inf"/"NaN"; a market value never spells those.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_parser_rejects_words() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
    }

    #[test]
    fn format_currency_normalizes_markers() {
        assert_eq!(format_currency(Some("€91M")), "€91.0M");
        assert_eq!(format_currency(Some("€575K")), "€575K");
        assert_eq!(format_currency(Some("€0")), "€0");
        assert_eq!(format_currency(Some("€abcM")), "N/A");
        assert_eq!(format_currency(None), "N/A");
    }
}
