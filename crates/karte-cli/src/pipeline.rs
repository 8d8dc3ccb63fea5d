//! Text-in, JSON-out pipeline shared by the CLI commands.
//!
//! The stages are pure; reading inputs and writing outputs happens in the
//! command layer.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{debug, info};

use karte_model::{
    GroupedRecord, NormalizeOptions, SectionCode, SectionRecord, from_json, to_json_pretty,
};
use karte_normalize::{flatten, normalize_with_options};
use karte_parse::{ParseStats, parse_with_stats};

use crate::logging::redact_value;

/// Shape of the converted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// One record per visit with a field per section.
    #[default]
    Grouped,
    /// One record per parsed section, before any merging.
    Flat,
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub shape: OutputShape,
    pub normalize: NormalizeOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertedRecords {
    Grouped(Vec<GroupedRecord>),
    Flat(Vec<SectionRecord>),
}

impl ConvertedRecords {
    pub fn len(&self) -> usize {
        match self {
            ConvertedRecords::Grouped(records) => records.len(),
            ConvertedRecords::Flat(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> Result<String> {
        let json = match self {
            ConvertedRecords::Grouped(records) => to_json_pretty(records),
            ConvertedRecords::Flat(records) => to_json_pretty(records),
        };
        json.context("render records as JSON")
    }
}

#[derive(Debug, Clone)]
pub struct Conversion {
    /// Present when the input was chart text.
    pub stats: Option<ParseStats>,
    /// Section records before deduplication.
    pub section_count: usize,
    pub records: ConvertedRecords,
}

/// Joins separately captured fragments the way successive clipboard
/// captures accumulate: one newline between captures.
pub fn join_captures<S: AsRef<str>>(captures: &[S]) -> String {
    captures
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses chart text and, unless flat output was requested, merges the
/// sections into per-visit records.
pub fn convert_text(text: &str, options: &ConvertOptions) -> Result<Conversion> {
    if text.trim().is_empty() {
        bail!("no text to convert");
    }
    let report = parse_with_stats(text);
    let section_count = report.records.len();
    info!(
        lines = report.stats.lines,
        sections = section_count,
        dropped_lines = report.stats.dropped_lines,
        "chart text parsed"
    );
    let records = match options.shape {
        OutputShape::Flat => ConvertedRecords::Flat(report.records),
        OutputShape::Grouped => {
            let visits = normalize_with_options(report.records, &options.normalize)
                .context("normalize parsed sections")?;
            log_visits(&visits);
            ConvertedRecords::Grouped(visits)
        }
    };
    Ok(Conversion {
        stats: Some(report.stats),
        section_count,
        records,
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordInput {
    Section(SectionRecord),
    Grouped(GroupedRecord),
}

/// Re-normalizes previously converted output. Each document is a JSON
/// array of visit records or flat section records (mixing is allowed).
pub fn merge_documents<S: AsRef<str>>(
    documents: &[S],
    options: &NormalizeOptions,
) -> Result<Conversion> {
    let mut sections = Vec::new();
    for (index, document) in documents.iter().enumerate() {
        let inputs: Vec<RecordInput> = from_json(document.as_ref())
            .with_context(|| format!("read records from input #{}", index + 1))?;
        debug!(input = index + 1, records = inputs.len(), "records loaded");
        for input in inputs {
            match input {
                RecordInput::Section(record) => sections.push(record),
                RecordInput::Grouped(record) => sections.extend(flatten([record])),
            }
        }
    }
    let section_count = sections.len();
    let visits =
        normalize_with_options(sections, options).context("normalize merged records")?;
    info!(
        sections = section_count,
        visits = visits.len(),
        "records merged"
    );
    log_visits(&visits);
    Ok(Conversion {
        stats: None,
        section_count,
        records: ConvertedRecords::Grouped(visits),
    })
}

fn log_visits(visits: &[GroupedRecord]) {
    for visit in visits {
        let codes: Vec<&str> = visit
            .section_codes()
            .iter()
            .map(SectionCode::as_code)
            .collect();
        debug!(
            date = redact_value(&visit.date),
            time = redact_value(&visit.time),
            department = redact_value(&visit.department),
            sections = %codes.join(","),
            "visit"
        );
    }
}
