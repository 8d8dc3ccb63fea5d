//! Output ordering on `(date, time)`.
//!
//! Dates and times are compared as plain strings. That only matches
//! chronological order while every date starts with a zero-padded
//! `YYYY/MM/DD` and every time is a zero-padded `HH:MM`;
//! [`check_sort_key`] and [`sort_key_issues`] detect records that break
//! this.

use chrono::{NaiveDate, NaiveTime};
use karte_model::{DigitWidth, GroupedRecord, digit_width, fold_digits};

use crate::error::SortKeyIssue;

const DATE_SHAPE: &str = "dddd/dd/dd";
const TIME_SHAPE: &str = "dd:dd";

/// Stable ascending sort on `(date, time)`.
pub fn sort_by_date_time(records: &mut [GroupedRecord]) {
    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

pub fn check_sort_key(record: &GroupedRecord) -> Result<(), SortKeyIssue> {
    sort_key_width(record).map(|_| ())
}

/// Validates one record's key and returns the digit width it is written in.
/// ASCII and full-width digits are both accepted, but not mixed.
pub fn sort_key_width(record: &GroupedRecord) -> Result<DigitWidth, SortKeyIssue> {
    let (date_digits, _) =
        match_prefix(&record.date, DATE_SHAPE).ok_or(SortKeyIssue::UnpaddedDate)?;
    let time_digits = match match_prefix(&record.time, TIME_SHAPE) {
        Some((digits, "")) => digits,
        _ => return Err(SortKeyIssue::UnpaddedTime),
    };
    let width = date_digits
        .merge(time_digits)
        .width()
        .ok_or(SortKeyIssue::MixedDigits)?;

    let date = fold_digits(&record.date);
    date.get(..DATE_SHAPE.len())
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y/%m/%d").ok())
        .ok_or(SortKeyIssue::InvalidDate)?;
    NaiveTime::parse_from_str(&fold_digits(&record.time), "%H:%M")
        .map_err(|_| SortKeyIssue::InvalidTime)?;
    Ok(width)
}

/// Every record whose key would not sort chronologically as a string,
/// with its index. The first valid record fixes the digit width for the
/// batch, since full-width digits sort after all ASCII ones.
pub fn sort_key_issues(records: &[GroupedRecord]) -> Vec<(usize, SortKeyIssue)> {
    let mut batch_width = None;
    let mut issues = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match sort_key_width(record) {
            Ok(width) => match batch_width {
                None => batch_width = Some(width),
                Some(expected) if expected != width => {
                    issues.push((index, SortKeyIssue::InconsistentDigits));
                }
                Some(_) => {}
            },
            Err(issue) => issues.push((index, issue)),
        }
    }
    issues
}

#[derive(Debug, Clone, Copy, Default)]
struct DigitsSeen {
    ascii: bool,
    full_width: bool,
}

impl DigitsSeen {
    fn add(&mut self, width: DigitWidth) {
        match width {
            DigitWidth::Ascii => self.ascii = true,
            DigitWidth::FullWidth => self.full_width = true,
        }
    }

    fn merge(self, other: DigitsSeen) -> DigitsSeen {
        DigitsSeen {
            ascii: self.ascii || other.ascii,
            full_width: self.full_width || other.full_width,
        }
    }

    fn width(self) -> Option<DigitWidth> {
        match (self.ascii, self.full_width) {
            (true, false) => Some(DigitWidth::Ascii),
            (false, true) => Some(DigitWidth::FullWidth),
            _ => None,
        }
    }
}

/// Matches `shape` against the start of `value`, character by character.
/// `d` in `shape` stands for a digit of either width, anything else must
/// match exactly. Returns the digits seen and the unmatched rest.
fn match_prefix<'a>(value: &'a str, shape: &str) -> Option<(DigitsSeen, &'a str)> {
    let mut seen = DigitsSeen::default();
    let mut chars = value.char_indices();
    for expected in shape.chars() {
        let (_, actual) = chars.next()?;
        if expected == 'd' {
            seen.add(digit_width(actual)?);
        } else if actual != expected {
            return None;
        }
    }
    let rest = chars.next().map_or("", |(offset, _)| &value[offset..]);
    Some((seen, rest))
}
