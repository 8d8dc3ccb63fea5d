//! Grouping and deduplication of parsed chart sections.
//!
//! [`normalize`] runs three passes over the parser output and sorts the
//! result:
//!
//! 1. drop exact duplicate section records
//! 2. merge sections sharing `(date, department, time)` into one visit record
//! 3. drop visit records whose full field set was already seen
//!
//! Records come back ordered by `(date, time)` compared as strings.

pub mod dedupe;
pub mod error;
pub mod merge;
pub mod sort;

use karte_model::{GroupedRecord, NormalizeOptions, SectionRecord, SortKeyPolicy};
use tracing::{debug_span, warn};

pub use dedupe::{dedupe_grouped_records, dedupe_section_records};
pub use error::{NormalizeError, Result, SortKeyIssue};
pub use merge::{flatten, merge_by_visit, merge_content};
pub use sort::{check_sort_key, sort_by_date_time, sort_key_issues, sort_key_width};

/// Deduplicates, merges per visit, and sorts. Records whose date or time
/// cannot be ordered lexically are logged and sorted as-is.
pub fn normalize(records: Vec<SectionRecord>) -> Vec<GroupedRecord> {
    let mut grouped = group(records);
    for (index, issue) in sort_key_issues(&grouped) {
        warn!(index, %issue, "visit record may be out of order");
    }
    sort_by_date_time(&mut grouped);
    grouped
}

pub fn normalize_with_options(
    records: Vec<SectionRecord>,
    options: &NormalizeOptions,
) -> Result<Vec<GroupedRecord>> {
    match options.sort_keys {
        SortKeyPolicy::Lenient => Ok(normalize(records)),
        SortKeyPolicy::Strict => {
            let mut grouped = group(records);
            if let Some(&(index, issue)) = sort_key_issues(&grouped).first() {
                let record = &grouped[index];
                return Err(NormalizeError::UnorderableKey {
                    date: record.date.clone(),
                    time: record.time.clone(),
                    issue,
                });
            }
            sort_by_date_time(&mut grouped);
            Ok(grouped)
        }
    }
}

fn group(records: Vec<SectionRecord>) -> Vec<GroupedRecord> {
    let span = debug_span!("normalize", sections = records.len());
    let _guard = span.enter();
    let unique = dedupe_section_records(records);
    let merged = merge_by_visit(unique);
    dedupe_grouped_records(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use karte_model::SectionCode;

    fn section(date: &str, time: &str, code: SectionCode, content: &str) -> SectionRecord {
        SectionRecord {
            date: date.to_string(),
            department: "内科".to_string(),
            time: time.to_string(),
            section: code,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_lenient_keeps_unpadded_records() {
        let records = vec![
            section("2025/04/18(金)", "9:05", SectionCode::Plan, "継続"),
            section("2025/04/18(金)", "12:41", SectionCode::Plan, "中止"),
        ];
        let grouped = normalize(records);
        assert_eq!(grouped.len(), 2);
        // lexical order puts "12:41" before "9:05"
        assert_eq!(grouped[0].time, "12:41");
    }

    #[test]
    fn test_strict_rejects_unpadded_records() {
        let records = vec![section("2025/04/18(金)", "9:05", SectionCode::Plan, "継続")];
        let err = normalize_with_options(records, &NormalizeOptions::strict()).unwrap_err();
        let NormalizeError::UnorderableKey { time, issue, .. } = err;
        assert_eq!(time, "9:05");
        assert_eq!(issue, SortKeyIssue::UnpaddedTime);
    }

    #[test]
    fn test_strict_rejects_batches_mixing_digit_widths() {
        let records = vec![
            section("2025/04/19(土)", "09:05", SectionCode::Subjective, "咳"),
            section("２０２５/０４/１８(金)", "１２:４１", SectionCode::Plan, "継続"),
        ];
        let err = normalize_with_options(records.clone(), &NormalizeOptions::strict()).unwrap_err();
        let NormalizeError::UnorderableKey { date, issue, .. } = err;
        assert_eq!(date, "２０２５/０４/１８(金)");
        assert_eq!(issue, SortKeyIssue::InconsistentDigits);

        // full-width sorts after ASCII regardless of the calendar
        let lenient = normalize(records);
        assert_eq!(lenient[0].date, "2025/04/19(土)");
    }

    #[test]
    fn test_strict_accepts_full_width_batches() {
        let records = vec![
            section("２０２５/０４/１９(土)", "０９:０５", SectionCode::Subjective, "咳"),
            section("２０２５/０４/１８(金)", "１２:４１", SectionCode::Plan, "継続"),
        ];
        let grouped = normalize_with_options(records, &NormalizeOptions::strict()).unwrap();
        assert_eq!(grouped[0].date, "２０２５/０４/１８(金)");
        assert_eq!(grouped[1].date, "２０２５/０４/１９(土)");
    }

    #[test]
    fn test_strict_matches_lenient_for_valid_input() {
        let records = vec![
            section("2025/04/19(土)", "09:05", SectionCode::Subjective, "咳"),
            section("2025/04/18(金)", "12:41", SectionCode::Assessment, "安定"),
            section("2025/04/18(金)", "12:41", SectionCode::Assessment, "安定"),
        ];
        let strict = normalize_with_options(records.clone(), &NormalizeOptions::strict()).unwrap();
        assert_eq!(strict, normalize(records));
        assert_eq!(strict.len(), 2);
        assert_eq!(strict[0].date, "2025/04/18(金)");
    }
}
