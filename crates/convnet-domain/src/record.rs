//! Input records handed over by the ingestion layer
//!
//! The ingestion layer stores records as a mapping from amendment id to record.
//! [`RecordSet`] deserializes that mapping while keeping document order, because
//! the assembler processes records in input order.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Kind of document a record was scraped from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A top-level motion
    Motion,

    /// An amendment to a motion
    #[default]
    Amendment,

    /// Anything else the scraper tagged
    #[serde(other)]
    Other,
}

/// One co-signer line of an amendment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupporterEntry {
    /// Externally supplied identifier, preferred over the slugified name
    pub id: Option<String>,

    /// Display name as scraped
    pub name: String,

    /// Regional-chapter tag
    pub kv: String,
}

impl SupporterEntry {
    /// Create an entry carrying only a display name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kv: String::new(),
        }
    }

    /// Attach an explicit identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach a regional-chapter tag
    pub fn with_kv(mut self, kv: impl Into<String>) -> Self {
        self.kv = kv.into();
        self
    }
}

/// Structured author information, when the scraper found it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicantDetails {
    /// Explicit author identifier
    pub id: Option<String>,

    /// Author display name
    pub name: Option<String>,

    /// Author regional-chapter tag
    pub kv: Option<String>,
}

/// A scraped amendment record. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AmendmentRecord {
    /// Amendment identifier (the key in the input mapping)
    pub id: String,

    /// Convention registry key
    pub convention: String,

    /// Display label
    pub label: String,

    /// Source page
    pub url: String,

    /// Free-text author line
    pub author: String,

    /// Whether the author is an individual rather than an institution
    pub is_person: bool,

    /// Motion or amendment
    pub kind: RecordKind,

    /// Structured author information
    pub applicant: Option<ApplicantDetails>,

    /// Co-signers in scraped order
    pub supporters: Vec<SupporterEntry>,
}

impl AmendmentRecord {
    /// Create an empty record for a convention
    pub fn new(id: impl Into<String>, convention: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            convention: convention.into(),
            url: String::new(),
            author: String::new(),
            is_person: false,
            kind: RecordKind::Amendment,
            applicant: None,
            supporters: Vec::new(),
        }
    }

    /// Set the author line
    pub fn with_author(mut self, author: impl Into<String>, is_person: bool) -> Self {
        self.author = author.into();
        self.is_person = is_person;
        self
    }

    /// Append a supporter by display name
    pub fn with_supporter(self, name: impl Into<String>) -> Self {
        self.with_supporter_entry(SupporterEntry::named(name))
    }

    /// Append a fully specified supporter entry
    pub fn with_supporter_entry(mut self, entry: SupporterEntry) -> Self {
        self.supporters.push(entry);
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the record kind
    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Ordered collection of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<AmendmentRecord>,
}

impl RecordSet {
    /// Wrap records in the given order
    pub fn new(records: Vec<AmendmentRecord>) -> Self {
        Self { records }
    }

    /// Records in input order
    pub fn records(&self) -> &[AmendmentRecord] {
        &self.records
    }

    /// Iterate over records in input order
    pub fn iter(&self) -> std::slice::Iter<'_, AmendmentRecord> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<AmendmentRecord>> for RecordSet {
    fn from(records: Vec<AmendmentRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<AmendmentRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = AmendmentRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a AmendmentRecord;
    type IntoIter = std::slice::Iter<'a, AmendmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// Wire shapes. Scraped data is loose: any field may be missing or null.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    convention: Option<String>,
    label: Option<String>,
    url: Option<String>,
    author: Option<String>,
    // Different scraper generations wrote different keys, sometimes several at once
    is_person: Option<bool>,
    isperson: Option<bool>,
    isprs: Option<bool>,
    #[serde(rename = "type")]
    kind: Option<RecordKind>,
    applicant_details: Option<RawApplicant>,
    supporters: Option<Vec<Option<RawSupporter>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawApplicant {
    id: Option<String>,
    name: Option<String>,
    kv: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSupporter {
    id: Option<String>,
    name: Option<String>,
    kv: Option<String>,
}

impl RawRecord {
    fn into_record(self, id: String) -> AmendmentRecord {
        let supporters = self
            .supporters
            .unwrap_or_default()
            .into_iter()
            .map(|s| {
                let s = s.unwrap_or_default();
                SupporterEntry {
                    id: s.id.filter(|id| !id.is_empty()),
                    name: s.name.unwrap_or_default(),
                    kv: s.kv.unwrap_or_default(),
                }
            })
            .collect();

        AmendmentRecord {
            label: self.label.unwrap_or_else(|| id.clone()),
            id,
            convention: self.convention.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            is_person: self.is_person.or(self.isperson).or(self.isprs).unwrap_or(false),
            kind: self.kind.unwrap_or_default(),
            applicant: self.applicant_details.map(|a| ApplicantDetails {
                id: a.id.filter(|id| !id.is_empty()),
                name: a.name.filter(|n| !n.is_empty()),
                kv: a.kv.filter(|kv| !kv.is_empty()),
            }),
            supporters,
        }
    }
}

impl<'de> Deserialize<'de> for RecordSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordSetVisitor;

        impl<'de> Visitor<'de> for RecordSetVisitor {
            type Value = RecordSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of amendment id to record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RecordSet, A::Error> {
                let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, raw)) = map.next_entry::<String, Option<RawRecord>>()? {
                    records.push(raw.unwrap_or_default().into_record(id));
                }
                Ok(RecordSet { records })
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<RecordSet, E> {
                Ok(RecordSet::default())
            }
        }

        deserializer.deserialize_map(RecordSetVisitor)
    }
}
