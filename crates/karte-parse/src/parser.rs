use karte_model::SectionRecord;
use tracing::{debug, debug_span, trace};

use crate::context::{Line, ParseContext};

/// Line counts gathered during one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub blank: usize,
    pub date_headers: usize,
    pub entry_headers: usize,
    pub section_headers: usize,
    pub content_lines: usize,
    /// Content lines seen while no section was active.
    pub dropped_lines: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub records: Vec<SectionRecord>,
    pub stats: ParseStats,
}

/// Parses chart text into section records, in document order.
pub fn parse(text: &str) -> Vec<SectionRecord> {
    parse_with_stats(text).records
}

pub fn parse_with_stats(text: &str) -> ParseReport {
    let span = debug_span!("parse", bytes = text.len());
    let _guard = span.enter();

    let mut context = ParseContext::new();
    let mut records = Vec::new();
    let mut stats = ParseStats::default();

    // `\r\n` yields an extra blank line, which is skipped like any other.
    for (index, raw) in text.split(['\n', '\r']).enumerate() {
        let line = context.classify(raw);
        stats.lines += 1;
        match line {
            Line::Blank => stats.blank += 1,
            Line::DateHeader(_) => stats.date_headers += 1,
            Line::EntryHeader(_) => stats.entry_headers += 1,
            Line::SectionHeader(code) => {
                stats.section_headers += 1;
                trace!(line = index + 1, section = %code, "section header");
            }
            Line::Content(_) => {
                if context.active_section().is_some() {
                    stats.content_lines += 1;
                } else {
                    stats.dropped_lines += 1;
                    trace!(line = index + 1, "content outside a section");
                }
            }
        }
        if let Some(record) = context.apply(line) {
            records.push(record);
        }
    }
    records.extend(context.finish());

    debug!(
        lines = stats.lines,
        records = records.len(),
        dropped_lines = stats.dropped_lines,
        "parse complete"
    );
    ParseReport { records, stats }
}
