use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dataset::PlayerTable;

pub const UNKNOWN_POSITION: &str = "N/A";

static POSITION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">([A-Z]+)<").expect("position pattern compiles"));

/// Pull the position code out of markup such as `<span class="pos">ST</span>`.
///
/// The code is a run of uppercase ASCII letters sitting directly between a
/// `>` and the next `<`; the first such run in the text wins.
pub fn extract_position(raw: Option<&str>) -> String {
    raw.and_then(|raw| POSITION_CODE.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|code| code.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_POSITION.to_string())
}

/// Sorted, de-duplicated position codes present in the table.
pub fn position_options(table: &PlayerTable) -> Vec<String> {
    table
        .records()
        .iter()
        .map(|p| extract_position(Some(&p.position_raw)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_empty_elements_before_the_code() {
        assert_eq!(
            extract_position(Some("<td><span class=\"pos pos28\">CAM</span></td>")),
            "CAM"
        );
    }

    #[test]
    fn stray_brackets_before_the_code_are_skipped() {
        assert_eq!(extract_position(Some(">>ST<")), "ST");
        assert_eq!(extract_position(Some("<td><span>ST</span>")), "ST");
    }

    #[test]
    fn lowercase_or_unterminated_codes_do_not_match() {
        assert_eq!(extract_position(Some("<span>st</span>")), UNKNOWN_POSITION);
        assert_eq!(extract_position(Some("<span>ST")), UNKNOWN_POSITION);
        assert_eq!(extract_position(Some("<span>C4</span>")), UNKNOWN_POSITION);
        assert_eq!(extract_position(Some("")), UNKNOWN_POSITION);
    }
}
