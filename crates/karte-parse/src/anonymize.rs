//! Strips clinician and insurance fields from entry header lines.
//!
//! `内科　　波部　孝弘　　国保　　12:41` becomes `内科　　12:41`: the first
//! field and the separator after it are kept, everything up to the trailing
//! time is removed. Other lines pass through unchanged.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Separators are horizontal whitespace only, so a match never spans lines.
static ENTRY_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^(\S+[^\S\r\n]+).+?[^\S\r\n]+(\d{1,2}:\d{2})$")
        .expect("Invalid entry line regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anonymized {
    pub text: String,
    pub redacted_lines: usize,
}

pub fn anonymize(text: &str) -> Anonymized {
    let redacted_lines = ENTRY_LINE_REGEX.find_iter(text).count();
    let text = ENTRY_LINE_REGEX.replace_all(text, "${1}${2}").into_owned();
    debug!(redacted_lines, "anonymize complete");
    Anonymized {
        text,
        redacted_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_line_loses_clinician_and_insurance() {
        let result = anonymize("内科　　波部　孝弘　　国保　　12:41");
        assert_eq!(result.text, "内科　　12:41");
        assert_eq!(result.redacted_lines, 1);
    }

    #[test]
    fn test_other_lines_are_untouched() {
        let text = "2025/04/18(金)　（入院 71 日目）\n内科 波部 国保 9:05\nA>\n状態安定";
        let result = anonymize(text);
        assert_eq!(
            result.text,
            "2025/04/18(金)　（入院 71 日目）\n内科 9:05\nA>\n状態安定"
        );
        assert_eq!(result.redacted_lines, 1);
    }

    #[test]
    fn test_match_does_not_cross_lines() {
        let text = "内科\n波部 国保 12:41";
        let result = anonymize(text);
        assert_eq!(result.text, "内科\n波部 12:41");
    }

    #[test]
    fn test_full_width_time() {
        let result = anonymize("内科　波部　国保　１２:４１");
        assert_eq!(result.text, "内科　１２:４１");
        assert_eq!(result.redacted_lines, 1);
    }

    #[test]
    fn test_crlf_lines() {
        let result = anonymize("内科 波部 国保 12:41\r\nS>\r\n");
        assert_eq!(result.text, "内科 12:41\r\nS>\r\n");
    }
}
