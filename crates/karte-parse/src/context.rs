//! Parse state and line transitions.
//!
//! A [`ParseContext`] lives for exactly one parse call. Each trimmed line
//! is first classified against the current state ([`ParseContext::classify`])
//! and then applied ([`ParseContext::apply`]); header transitions flush the
//! pending section before the state changes.

use std::mem;

use karte_model::{SectionCode, SectionRecord};
use tracing::trace;

use crate::patterns::{
    DateHeader, EntryHeader, match_date_header, match_entry_header, match_section_header,
};

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    DateHeader(DateHeader<'a>),
    EntryHeader(EntryHeader<'a>),
    SectionHeader(SectionCode),
    Content(&'a str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    date: Option<String>,
    admission_day: Option<u32>,
    department: Option<String>,
    time: Option<String>,
    active_section: Option<SectionCode>,
    content_buffer: String,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn admission_day(&self) -> Option<u32> {
        self.admission_day
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn active_section(&self) -> Option<SectionCode> {
        self.active_section
    }

    pub fn content_buffer(&self) -> &str {
        &self.content_buffer
    }

    /// Classifies a raw line. Priority: date header, entry header (needs a
    /// date), section header (needs an entry), then content.
    pub fn classify<'a>(&self, raw: &'a str) -> Line<'a> {
        let line = raw.trim();
        if line.is_empty() {
            return Line::Blank;
        }
        if let Some(header) = match_date_header(line) {
            return Line::DateHeader(header);
        }
        if self.date.is_some()
            && let Some(header) = match_entry_header(line)
        {
            return Line::EntryHeader(header);
        }
        if self.department.is_some()
            && let Some(code) = match_section_header(line)
        {
            return Line::SectionHeader(code);
        }
        Line::Content(line)
    }

    /// Applies a classified line, returning the section it completed, if any.
    pub fn apply(&mut self, line: Line<'_>) -> Option<SectionRecord> {
        match line {
            Line::Blank => None,
            Line::DateHeader(header) => {
                let flushed = self.flush();
                self.date = Some(header.date.to_string());
                self.admission_day = header.admission_day;
                self.department = None;
                self.time = None;
                self.active_section = None;
                flushed
            }
            Line::EntryHeader(header) => {
                let flushed = self.flush();
                self.department = Some(header.department.to_string());
                self.time = Some(header.time.to_string());
                self.active_section = None;
                flushed
            }
            Line::SectionHeader(code) => {
                let flushed = self.flush();
                self.active_section = Some(code);
                flushed
            }
            Line::Content(text) => {
                if self.active_section.is_some() {
                    self.content_buffer.push_str(text);
                    self.content_buffer.push('\n');
                } else {
                    trace!("dropping content line outside any section");
                }
                None
            }
        }
    }

    /// Flushes whatever section is still pending at end of input.
    pub fn finish(mut self) -> Option<SectionRecord> {
        self.flush()
    }

    /// Empties the content buffer and builds a record when every identity
    /// field, a section, and non-blank content are present.
    fn flush(&mut self) -> Option<SectionRecord> {
        let buffer = mem::take(&mut self.content_buffer);
        let content = buffer.trim();
        if content.is_empty() {
            return None;
        }
        let (Some(date), Some(department), Some(time), Some(section)) = (
            self.date.as_ref(),
            self.department.as_ref(),
            self.time.as_ref(),
            self.active_section,
        ) else {
            trace!("discarding content without a complete entry context");
            return None;
        };
        Some(SectionRecord {
            date: date.clone(),
            department: department.clone(),
            time: time.clone(),
            section,
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(context: &mut ParseContext, raw: &str) -> Option<SectionRecord> {
        let line = context.classify(raw);
        context.apply(line)
    }

    fn entered() -> ParseContext {
        let mut context = ParseContext::new();
        feed(&mut context, "2025/04/18(金)　（入院 71 日目）");
        feed(&mut context, "内科　　波部　孝弘　　国保　　12:41");
        context
    }

    #[test]
    fn test_entry_header_needs_a_date() {
        let context = ParseContext::new();
        assert_eq!(
            context.classify("内科 波部 国保 12:41"),
            Line::Content("内科 波部 国保 12:41")
        );
    }

    #[test]
    fn test_section_header_needs_an_entry() {
        let mut context = ParseContext::new();
        feed(&mut context, "2025/04/18(金)");
        assert_eq!(context.classify("S>"), Line::Content("S>"));
        assert_eq!(context.admission_day(), None);
    }

    #[test]
    fn test_date_header_wins_over_entry_shape() {
        let context = entered();
        assert!(matches!(
            context.classify("2025/04/19(土) 外来 再診 10:00"),
            Line::DateHeader(_)
        ));
    }

    #[test]
    fn test_blank_lines_do_not_touch_state() {
        let mut context = entered();
        feed(&mut context, "S>");
        feed(&mut context, "頭痛");
        let before = context.clone();
        assert_eq!(feed(&mut context, "　 \t"), None);
        assert_eq!(context, before);
    }

    #[test]
    fn test_content_accumulates_with_newlines() {
        let mut context = entered();
        assert_eq!(context.admission_day(), Some(71));
        feed(&mut context, "O>");
        feed(&mut context, "  BT 36.5  ");
        feed(&mut context, "BP 120/80");
        assert_eq!(context.content_buffer(), "BT 36.5\nBP 120/80\n");
    }

    #[test]
    fn test_section_change_flushes_and_resets_buffer() {
        let mut context = entered();
        feed(&mut context, "S>");
        feed(&mut context, "頭痛");
        let record = feed(&mut context, "A>").expect("flushed subjective");
        assert_eq!(record.section, SectionCode::Subjective);
        assert_eq!(record.content, "頭痛");
        assert_eq!(record.department, "内科");
        assert_eq!(record.time, "12:41");
        assert_eq!(context.content_buffer(), "");
        assert_eq!(context.active_section(), Some(SectionCode::Assessment));
    }

    #[test]
    fn test_entry_header_keeps_date_and_clears_section() {
        let mut context = entered();
        feed(&mut context, "P>");
        feed(&mut context, "継続");
        let record = feed(&mut context, "外科　山田　太郎　社保　15:00").expect("flushed plan");
        assert_eq!(record.section, SectionCode::Plan);
        assert_eq!(context.date(), Some("2025/04/18(金)"));
        assert_eq!(context.department(), Some("外科"));
        assert_eq!(context.time(), Some("15:00"));
        assert_eq!(context.active_section(), None);
    }

    #[test]
    fn test_date_header_resets_entry() {
        let mut context = entered();
        feed(&mut context, "S>");
        feed(&mut context, "咳");
        let record = feed(&mut context, "2025/04/19(土)").expect("flushed subjective");
        assert_eq!(record.date, "2025/04/18(金)");
        assert_eq!(context.date(), Some("2025/04/19(土)"));
        assert_eq!(context.department(), None);
        assert_eq!(context.time(), None);
        assert_eq!(context.active_section(), None);
    }

    #[test]
    fn test_empty_section_is_not_emitted() {
        let mut context = entered();
        feed(&mut context, "S>");
        assert_eq!(feed(&mut context, "O>"), None);
        assert_eq!(context.finish(), None);
    }

    #[test]
    fn test_finish_flushes_pending_section() {
        let mut context = entered();
        feed(&mut context, "サ>");
        feed(&mut context, "退院方針");
        let record = context.finish().expect("pending summary");
        assert_eq!(record.section, SectionCode::Summary);
        assert_eq!(record.content, "退院方針");
    }

    #[test]
    fn test_unknown_code_is_content() {
        let mut context = entered();
        feed(&mut context, "S>");
        assert_eq!(context.classify("X> メモ"), Line::Content("X> メモ"));
        feed(&mut context, "X> メモ");
        assert_eq!(context.content_buffer(), "X> メモ\n");
    }
}
