pub mod digits;
pub mod error;
pub mod json;
pub mod options;
pub mod record;
pub mod section;

pub use digits::{DigitWidth, digit_width, fold_digits};
pub use error::{KarteError, Result};
pub use json::{from_json, to_json_pretty};
pub use options::{NormalizeOptions, SortKeyPolicy};
pub use record::{GroupedRecord, SectionRecord, VisitKey};
pub use section::SectionCode;
