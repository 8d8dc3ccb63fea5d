//! Header line patterns.
//!
//! Each matcher is purely syntactic and expects an already trimmed line;
//! whether a match is honoured depends on the parse context.

use std::sync::LazyLock;

use karte_model::{SectionCode, fold_digits};
use regex::Regex;

/// `2025/04/18(金)` optionally followed by `（入院 71 日目）`.
/// `\d` is Unicode-aware, so full-width digits match too.
static DATE_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}/\d{2}/\d{2}\(.?\))(?:\s*（入院\s*(\d+)\s*日目）)?")
        .expect("Invalid date header regex")
});

/// Four whitespace separated fields ending in `HH:MM`.
/// Fields 1 to 3 are lazy so the trailing time decides the split.
static ENTRY_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(.+?)\s+(.+?)\s+(\d{2}:\d{2})$")
        .expect("Invalid entry header regex")
});

/// Single character code followed by `>`.
static SECTION_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S)\s*>").expect("Invalid section header regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateHeader<'a> {
    pub date: &'a str,
    pub admission_day: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader<'a> {
    pub department: &'a str,
    pub time: &'a str,
}

pub fn match_date_header(line: &str) -> Option<DateHeader<'_>> {
    let captures = DATE_HEADER_REGEX.captures(line)?;
    let date = captures.get(1)?.as_str();
    let admission_day = captures
        .get(2)
        .and_then(|day| fold_digits(day.as_str()).parse::<u32>().ok());
    Some(DateHeader {
        date,
        admission_day,
    })
}

pub fn match_entry_header(line: &str) -> Option<EntryHeader<'_>> {
    let captures = ENTRY_HEADER_REGEX.captures(line)?;
    Some(EntryHeader {
        department: captures.get(1)?.as_str().trim(),
        time: captures.get(4)?.as_str().trim(),
    })
}

/// Returns the section code of a `<code>>` line; unknown codes do not match.
pub fn match_section_header(line: &str) -> Option<SectionCode> {
    let captures = SECTION_HEADER_REGEX.captures(line)?;
    captures.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_header_with_admission_day() {
        let header = match_date_header("2025/04/18(金)　（入院 71 日目）").unwrap();
        assert_eq!(header.date, "2025/04/18(金)");
        assert_eq!(header.admission_day, Some(71));
    }

    #[test]
    fn test_date_header_without_admission_day() {
        let header = match_date_header("2025/04/18(金)").unwrap();
        assert_eq!(header.date, "2025/04/18(金)");
        assert_eq!(header.admission_day, None);

        let empty_weekday = match_date_header("2025/04/18()").unwrap();
        assert_eq!(empty_weekday.date, "2025/04/18()");
    }

    #[test]
    fn test_full_width_digits() {
        let header = match_date_header("２０２５/０４/１８(金)（入院 ７１ 日目）").unwrap();
        assert_eq!(header.date, "２０２５/０４/１８(金)");
        assert_eq!(header.admission_day, Some(71));

        let entry = match_entry_header("内科　波部　国保　１２:４１").unwrap();
        assert_eq!(entry.department, "内科");
        assert_eq!(entry.time, "１２:４１");
    }

    #[test]
    fn test_date_header_rejects_other_shapes() {
        assert!(match_date_header("2025/4/18(金)").is_none());
        assert!(match_date_header("受診日 2025/04/18(金)").is_none());
        assert!(match_date_header("2025-04-18(金)").is_none());
    }

    #[test]
    fn test_entry_header_keeps_department_and_time() {
        let header = match_entry_header("内科　　波部　孝弘　　国保　　12:41").unwrap();
        assert_eq!(header.department, "内科");
        assert_eq!(header.time, "12:41");

        let ascii = match_entry_header("Surgery Dr Smith NHI 08:05").unwrap();
        assert_eq!(ascii.department, "Surgery");
        assert_eq!(ascii.time, "08:05");
    }

    #[test]
    fn test_entry_header_requires_trailing_time() {
        assert!(match_entry_header("内科 波部 国保").is_none());
        assert!(match_entry_header("内科 国保 12:41").is_none());
        assert!(match_entry_header("内科 波部 国保 9:41").is_none());
        assert!(match_entry_header("内科 波部 国保 12:41 追記").is_none());
    }

    #[test]
    fn test_section_header_codes() {
        assert_eq!(match_section_header("S>"), Some(SectionCode::Subjective));
        assert_eq!(match_section_header("A >"), Some(SectionCode::Assessment));
        assert_eq!(match_section_header("サ>"), Some(SectionCode::Summary));
        assert_eq!(match_section_header("F> 追記"), Some(SectionCode::FreeNote));
        assert_eq!(match_section_header("X>"), None);
        assert_eq!(match_section_header("S"), None);
        assert_eq!(match_section_header("SO>"), None);
    }
}
