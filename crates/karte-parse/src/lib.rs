//! Section parser for clinical chart text copied out of a hospital records
//! system.
//!
//! The input is a sequence of date headers, entry headers (department,
//! clinician, insurance category, time), and `S>`/`O>`/`A>`/`P>`/`F>`/`サ>`
//! section headers followed by free text. [`parse`] turns it into one
//! [`karte_model::SectionRecord`] per non-empty section. Malformed fragments
//! are dropped, never reported as errors.

pub mod anonymize;
pub mod context;
pub mod parser;
pub mod patterns;

pub use anonymize::{Anonymized, anonymize};
pub use context::{Line, ParseContext};
pub use parser::{ParseReport, ParseStats, parse, parse_with_stats};
pub use patterns::{
    DateHeader, EntryHeader, match_date_header, match_entry_header, match_section_header,
};
