//! Section records and merged visit records.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::section::SectionCode;

/// Identity of a visit: one entry header within one date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisitKey {
    pub date: String,
    pub department: String,
    pub time: String,
}

/// One section of one visit, as emitted by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionRecord {
    pub date: String,
    pub department: String,
    pub time: String,
    #[serde(rename = "soap_section")]
    pub section: SectionCode,
    pub content: String,
}

impl SectionRecord {
    pub fn key(&self) -> VisitKey {
        VisitKey {
            date: self.date.clone(),
            department: self.department.clone(),
            time: self.time.clone(),
        }
    }
}

/// All sections recorded for one visit.
///
/// Serializes as a flat object: `date`, `department`, `time`, then one
/// `<field>: content` entry per section in the order sections were first
/// recorded. Equality ignores that order.
#[derive(Debug, Clone)]
pub struct GroupedRecord {
    pub date: String,
    pub department: String,
    pub time: String,
    sections: Vec<(SectionCode, String)>,
}

impl GroupedRecord {
    pub fn new(key: VisitKey) -> Self {
        Self {
            date: key.date,
            department: key.department,
            time: key.time,
            sections: Vec::new(),
        }
    }

    pub fn key(&self) -> VisitKey {
        VisitKey {
            date: self.date.clone(),
            department: self.department.clone(),
            time: self.time.clone(),
        }
    }

    /// `(date, time)` pair the output is ordered by.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.date, &self.time)
    }

    pub fn section(&self, code: SectionCode) -> Option<&str> {
        self.sections
            .iter()
            .find(|(existing, _)| *existing == code)
            .map(|(_, content)| content.as_str())
    }

    pub fn section_mut(&mut self, code: SectionCode) -> Option<&mut String> {
        self.sections
            .iter_mut()
            .find(|(existing, _)| *existing == code)
            .map(|(_, content)| content)
    }

    /// Sets a section's content, replacing any previous value.
    pub fn set_section(&mut self, code: SectionCode, content: impl Into<String>) {
        let content = content.into();
        match self.section_mut(code) {
            Some(existing) => *existing = content,
            None => self.sections.push((code, content)),
        }
    }

    /// Sections in first-recorded order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionCode, &str)> {
        self.sections
            .iter()
            .map(|(code, content)| (*code, content.as_str()))
    }

    pub fn section_codes(&self) -> Vec<SectionCode> {
        self.sections.iter().map(|(code, _)| *code).collect()
    }

    /// All fields keyed by output name, sorted by name.
    pub fn canonical_fields(&self) -> BTreeMap<&'static str, &str> {
        let mut fields = BTreeMap::new();
        fields.insert("date", self.date.as_str());
        fields.insert("department", self.department.as_str());
        fields.insert("time", self.time.as_str());
        for (code, content) in &self.sections {
            fields.insert(code.field_name(), content.as_str());
        }
        fields
    }

    /// Splits the record back into one section record per field.
    pub fn into_section_records(self) -> Vec<SectionRecord> {
        let GroupedRecord {
            date,
            department,
            time,
            sections,
        } = self;
        sections
            .into_iter()
            .map(|(section, content)| SectionRecord {
                date: date.clone(),
                department: department.clone(),
                time: time.clone(),
                section,
                content,
            })
            .collect()
    }
}

impl PartialEq for GroupedRecord {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_fields() == other.canonical_fields()
    }
}

impl Eq for GroupedRecord {}

impl Serialize for GroupedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.sections.len()))?;
        map.serialize_entry("date", &self.date)?;
        map.serialize_entry("department", &self.department)?;
        map.serialize_entry("time", &self.time)?;
        for (code, content) in &self.sections {
            map.serialize_entry(code.field_name(), content)?;
        }
        map.end()
    }
}

const GROUPED_FIELDS: &[&str] = &[
    "date",
    "department",
    "time",
    "S_content",
    "O_content",
    "A_content",
    "P_content",
    "F_content",
    "summary_content",
];

impl<'de> Deserialize<'de> for GroupedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GroupedRecordVisitor)
    }
}

struct GroupedRecordVisitor;

impl<'de> Visitor<'de> for GroupedRecordVisitor {
    type Value = GroupedRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a visit record object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut date: Option<String> = None;
        let mut department: Option<String> = None;
        let mut time: Option<String> = None;
        let mut sections: Vec<(SectionCode, String)> = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "date" => set_once(&mut date, "date", map.next_value()?)?,
                "department" => set_once(&mut department, "department", map.next_value()?)?,
                "time" => set_once(&mut time, "time", map.next_value()?)?,
                other => {
                    let Some(code) = SectionCode::from_field_name(other) else {
                        return Err(de::Error::unknown_field(other, GROUPED_FIELDS));
                    };
                    if sections.iter().any(|(existing, _)| *existing == code) {
                        return Err(de::Error::duplicate_field(code.field_name()));
                    }
                    sections.push((code, map.next_value()?));
                }
            }
        }

        Ok(GroupedRecord {
            date: date.ok_or_else(|| de::Error::missing_field("date"))?,
            department: department.ok_or_else(|| de::Error::missing_field("department"))?,
            time: time.ok_or_else(|| de::Error::missing_field("time"))?,
            sections,
        })
    }
}

fn set_once<E: de::Error>(
    slot: &mut Option<String>,
    name: &'static str,
    value: String,
) -> Result<(), E> {
    if slot.is_some() {
        return Err(E::duplicate_field(name));
    }
    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit() -> GroupedRecord {
        GroupedRecord::new(VisitKey {
            date: "2025/04/18(金)".to_string(),
            department: "内科".to_string(),
            time: "12:41".to_string(),
        })
    }

    #[test]
    fn test_set_section_replaces_in_place() {
        let mut record = visit();
        record.set_section(SectionCode::Subjective, "頭痛");
        record.set_section(SectionCode::Plan, "経過観察");
        record.set_section(SectionCode::Subjective, "頭痛なし");
        assert_eq!(record.section(SectionCode::Subjective), Some("頭痛なし"));
        assert_eq!(
            record.section_codes(),
            vec![SectionCode::Subjective, SectionCode::Plan]
        );
    }

    #[test]
    fn test_equality_ignores_section_order() {
        let mut left = visit();
        left.set_section(SectionCode::Subjective, "a");
        left.set_section(SectionCode::Assessment, "b");
        let mut right = visit();
        right.set_section(SectionCode::Assessment, "b");
        right.set_section(SectionCode::Subjective, "a");
        assert_eq!(left, right);

        right.set_section(SectionCode::Plan, "c");
        assert_ne!(left, right);
    }

    #[test]
    fn test_serialize_is_flat_and_ordered() {
        let mut record = visit();
        record.set_section(SectionCode::Summary, "要約");
        record.set_section(SectionCode::Assessment, "状態安定");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2025/04/18(金)","department":"内科","time":"12:41","summary_content":"要約","A_content":"状態安定"}"#
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_and_missing_fields() {
        let unknown = r#"{"date":"d","department":"x","time":"t","Q_content":"?"}"#;
        assert!(serde_json::from_str::<GroupedRecord>(unknown).is_err());

        let missing = r#"{"date":"d","time":"t"}"#;
        let err = serde_json::from_str::<GroupedRecord>(missing).unwrap_err();
        assert!(err.to_string().contains("department"));
    }

    #[test]
    fn test_into_section_records() {
        let mut record = visit();
        record.set_section(SectionCode::Objective, "BP 120/80");
        record.set_section(SectionCode::FreeNote, "メモ");
        let records = record.into_section_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].section, SectionCode::Objective);
        assert_eq!(records[1].content, "メモ");
        assert_eq!(records[1].department, "内科");
    }

    #[test]
    fn test_section_record_uses_soap_section_key() {
        let record = SectionRecord {
            date: "2025/04/18(金)".to_string(),
            department: "内科".to_string(),
            time: "12:41".to_string(),
            section: SectionCode::Plan,
            content: "退院調整".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""soap_section":"P""#));
    }
}
