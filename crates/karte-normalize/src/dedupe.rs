//! Exact-duplicate removal, first occurrence wins.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use karte_model::{GroupedRecord, SectionRecord};
use tracing::debug;

/// Drops section records equal on all five fields to an earlier record.
pub fn dedupe_section_records(records: Vec<SectionRecord>) -> Vec<SectionRecord> {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);
    let kept: Vec<SectionRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect();
    debug!(before, after = kept.len(), "section records deduplicated");
    kept
}

/// Drops visit records whose full field set matches an earlier record.
pub fn dedupe_grouped_records(records: Vec<GroupedRecord>) -> Vec<GroupedRecord> {
    let before = records.len();
    let mut seen: BTreeSet<BTreeMap<&'static str, String>> = BTreeSet::new();
    let kept: Vec<GroupedRecord> = records
        .into_iter()
        .filter(|record| seen.insert(canonical_owned(record)))
        .collect();
    debug!(before, after = kept.len(), "visit records deduplicated");
    kept
}

fn canonical_owned(record: &GroupedRecord) -> BTreeMap<&'static str, String> {
    record
        .canonical_fields()
        .into_iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect()
}
