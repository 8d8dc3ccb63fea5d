//! Collapses section records into one record per visit.

use std::collections::HashMap;

use karte_model::{GroupedRecord, SectionRecord, VisitKey};
use tracing::debug;

/// Appends `incoming` on a new line unless `existing` already contains it.
///
/// Returns `true` when `existing` changed. Containment is a plain substring
/// test, so content differing only in whitespace is appended again.
pub fn merge_content(existing: &mut String, incoming: &str) -> bool {
    if existing.contains(incoming) {
        return false;
    }
    existing.push('\n');
    existing.push_str(incoming);
    true
}

/// Groups records by `(date, department, time)` in order of first
/// appearance, merging each section's content in arrival order.
pub fn merge_by_visit(records: Vec<SectionRecord>) -> Vec<GroupedRecord> {
    let total = records.len();
    let mut slots: HashMap<VisitKey, usize> = HashMap::new();
    let mut grouped: Vec<GroupedRecord> = Vec::new();
    let mut suppressed = 0usize;

    for record in records {
        let slot = *slots.entry(record.key()).or_insert_with_key(|key| {
            grouped.push(GroupedRecord::new(key.clone()));
            grouped.len() - 1
        });
        let visit = &mut grouped[slot];
        match visit.section_mut(record.section) {
            Some(existing) => {
                if !merge_content(existing, &record.content) {
                    suppressed += 1;
                }
            }
            None => visit.set_section(record.section, record.content),
        }
    }

    debug!(
        sections = total,
        visits = grouped.len(),
        suppressed,
        "sections merged by visit"
    );
    grouped
}

/// Splits visit records back into section records, e.g. to merge several
/// converted batches.
pub fn flatten(records: impl IntoIterator<Item = GroupedRecord>) -> Vec<SectionRecord> {
    records
        .into_iter()
        .flat_map(GroupedRecord::into_section_records)
        .collect()
}
