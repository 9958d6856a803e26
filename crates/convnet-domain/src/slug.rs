//! Person identity derivation
//!
//! Names are scraped free text, so identity comes from a slug: lowercase, spaces
//! become hyphens, everything outside `[a-z0-9-]` is dropped. An explicit id from
//! the ingestion layer always wins over the slug.

use crate::record::{AmendmentRecord, SupporterEntry};

/// Prefix separating person ids from amendment ids in the node namespace
pub const PERSON_PREFIX: &str = "person-";

/// Marker the scraper leaves when the "name" is a decision-date stamp
const DECISION_STAMP: &str = "beschlossen am:";

/// Slugify free text into an identifier fragment
///
/// Non-ASCII letters are dropped rather than transliterated, so "Müller"
/// becomes "mller". Ids stay stable as long as the spelling does.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Node id for a person slug
pub fn person_id(slug: &str) -> String {
    format!("{PERSON_PREFIX}{slug}")
}

/// Author text before any parenthetical suffix, trimmed
///
/// "Anna Muster (KV Berlin)" becomes "Anna Muster".
pub fn strip_parenthetical(author: &str) -> &str {
    author.split('(').next().unwrap_or_default().trim()
}

/// Whether a supporter name is really a decision-date stamp
///
/// Known data-quality heuristic, not a general classifier.
pub fn is_decision_stamp(name: &str) -> bool {
    name.to_lowercase().contains(DECISION_STAMP)
}

/// A person reference resolved from a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRef {
    /// Node id (`person-<slug>`)
    pub id: String,

    /// Display name
    pub label: String,

    /// Regional-chapter tag, possibly empty
    pub kv: String,
}

/// Resolve the author of a record, if it yields an authorship edge
///
/// Institutions (`is_person == false`) and blank author lines yield nothing.
pub fn resolve_author(record: &AmendmentRecord) -> Option<PersonRef> {
    if !record.is_person {
        return None;
    }

    let applicant = record.applicant.as_ref();
    let clean = strip_parenthetical(record.author.trim());
    if clean.is_empty() {
        return None;
    }

    let slug = match applicant.and_then(|a| a.id.as_deref()) {
        Some(id) => id.to_string(),
        None => slugify(clean),
    };
    if slug.is_empty() {
        return None;
    }

    Some(PersonRef {
        id: person_id(&slug),
        label: applicant
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| clean.to_string()),
        kv: applicant.and_then(|a| a.kv.clone()).unwrap_or_default(),
    })
}

/// Resolve a supporter entry, skipping blanks and decision stamps
pub fn resolve_supporter(entry: &SupporterEntry) -> Option<PersonRef> {
    let name = entry.name.trim();
    if name.is_empty() || is_decision_stamp(name) {
        return None;
    }

    let slug = match entry.id.as_deref() {
        Some(id) => id.to_string(),
        None => slugify(name),
    };
    if slug.is_empty() {
        return None;
    }

    Some(PersonRef {
        id: person_id(&slug),
        label: name.to_string(),
        kv: entry.kv.clone(),
    })
}
