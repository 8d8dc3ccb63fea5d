//! Closed set of chart section codes.
//!
//! Chart entries are split into SOAP subsections plus two local
//! extensions: `F` (free-form note) and `サ` (summary). Any other code is
//! not a section; callers parsing header lines rely on [`SectionCode::from_str`]
//! failing for unknown codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KarteError;

/// Section code as written in a `<code>>` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionCode {
    /// Subjective: what the patient reports.
    #[serde(rename = "S")]
    Subjective,

    /// Objective: findings, vitals, test results.
    #[serde(rename = "O")]
    Objective,

    /// Assessment: clinician's evaluation.
    #[serde(rename = "A")]
    Assessment,

    /// Plan: orders and next steps.
    #[serde(rename = "P")]
    Plan,

    /// Free-form note.
    #[serde(rename = "F")]
    FreeNote,

    /// Summary (`サ`).
    #[serde(rename = "サ")]
    Summary,
}

impl SectionCode {
    /// All section codes in display order.
    pub const ALL: [SectionCode; 6] = [
        SectionCode::Subjective,
        SectionCode::Objective,
        SectionCode::Assessment,
        SectionCode::Plan,
        SectionCode::FreeNote,
        SectionCode::Summary,
    ];

    /// Returns the code as it appears in chart text.
    pub fn as_code(&self) -> &'static str {
        match self {
            SectionCode::Subjective => "S",
            SectionCode::Objective => "O",
            SectionCode::Assessment => "A",
            SectionCode::Plan => "P",
            SectionCode::FreeNote => "F",
            SectionCode::Summary => "サ",
        }
    }

    /// Returns the field name used in merged visit records.
    pub fn field_name(&self) -> &'static str {
        match self {
            SectionCode::Subjective => "S_content",
            SectionCode::Objective => "O_content",
            SectionCode::Assessment => "A_content",
            SectionCode::Plan => "P_content",
            SectionCode::FreeNote => "F_content",
            SectionCode::Summary => "summary_content",
        }
    }

    /// Returns the English name of the section.
    pub fn label(&self) -> &'static str {
        match self {
            SectionCode::Subjective => "Subjective",
            SectionCode::Objective => "Objective",
            SectionCode::Assessment => "Assessment",
            SectionCode::Plan => "Plan",
            SectionCode::FreeNote => "Free note",
            SectionCode::Summary => "Summary",
        }
    }

    /// Reverse of [`SectionCode::field_name`].
    pub fn from_field_name(name: &str) -> Option<Self> {
        SectionCode::ALL
            .into_iter()
            .find(|code| code.field_name() == name)
    }
}

impl fmt::Display for SectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for SectionCode {
    type Err = KarteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S" => Ok(SectionCode::Subjective),
            "O" => Ok(SectionCode::Objective),
            "A" => Ok(SectionCode::Assessment),
            "P" => Ok(SectionCode::Plan),
            "F" => Ok(SectionCode::FreeNote),
            "サ" => Ok(SectionCode::Summary),
            _ => Err(KarteError::UnknownSection(s.to_string())),
        }
    }
}
