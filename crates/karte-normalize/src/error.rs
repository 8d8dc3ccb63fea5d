use thiserror::Error;

/// Why a `(date, time)` pair cannot be ordered as plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SortKeyIssue {
    #[error("date does not start with a zero-padded YYYY/MM/DD")]
    UnpaddedDate,
    #[error("date is not a calendar date")]
    InvalidDate,
    #[error("time is not a zero-padded HH:MM")]
    UnpaddedTime,
    #[error("time is out of range")]
    InvalidTime,
    #[error("date and time mix ASCII and full-width digits")]
    MixedDigits,
    #[error("digit width differs from earlier records")]
    InconsistentDigits,
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("cannot order record dated {date:?} at {time:?}: {issue}")]
    UnorderableKey {
        date: String,
        time: String,
        issue: SortKeyIssue,
    },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
