//! Record qualification
//!
//! Decides, per record, whether it enters the graph at all. Decisions are pure:
//! the filter never touches counters or the graph.

use crate::config::NetworkConfig;
use crate::record::{AmendmentRecord, RecordKind};
use crate::slug::{resolve_author, resolve_supporter, PersonRef};
use std::collections::HashSet;

/// Minimum number of retained supporters for an amendment to enter the graph
///
/// Counted after entry-level filtering, not as the raw length of the supporter
/// list: blanks, decision stamps, repeated ids and the author's own id do not
/// count. `author = Anna, supporters = [Anna, Ben]` is therefore rejected.
pub const MIN_SUPPORTERS: usize = 2;

/// Outcome of filtering a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    /// Record enters the graph
    Accepted,

    /// Convention is not in the configured set
    OutOfScope,

    /// Record kind is excluded (motions when `include_motions` is off)
    ExcludedKind,

    /// Fewer than [`MIN_SUPPORTERS`] distinct supporters remain
    TooFewSupporters {
        /// Supporters that survived entry-level filtering
        retained: usize,
    },
}

/// Per-record qualification predicate
#[derive(Debug, Clone)]
pub struct RecordFilter {
    conventions: HashSet<String>,
    include_motions: bool,
}

impl RecordFilter {
    /// Create a filter from network configuration
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            conventions: config.conventions.iter().cloned().collect(),
            include_motions: config.include_motions,
        }
    }

    /// Filter accepting every convention and record kind
    pub fn permissive() -> Self {
        Self::new(&NetworkConfig::default())
    }

    /// Whether the record qualifies for inclusion
    pub fn qualifies(&self, record: &AmendmentRecord) -> bool {
        self.verdict(record) == FilterVerdict::Accepted
    }

    /// Full verdict, including the rejection reason
    pub fn verdict(&self, record: &AmendmentRecord) -> FilterVerdict {
        if !self.conventions.is_empty() && !self.conventions.contains(&record.convention) {
            return FilterVerdict::OutOfScope;
        }

        if record.kind == RecordKind::Motion && !self.include_motions {
            return FilterVerdict::ExcludedKind;
        }

        let retained = retained_supporters(record).len();
        if retained < MIN_SUPPORTERS {
            return FilterVerdict::TooFewSupporters { retained };
        }

        FilterVerdict::Accepted
    }
}

/// Distinct supporters that will produce `supports` edges for this record
///
/// Blank names and decision stamps are skipped, repeated identifiers count once,
/// and the author (when they get an authorship edge) is not their own supporter.
pub fn retained_supporters(record: &AmendmentRecord) -> Vec<PersonRef> {
    let mut seen: HashSet<String> = HashSet::new();
    if let Some(author) = resolve_author(record) {
        seen.insert(author.id);
    }

    record
        .supporters
        .iter()
        .filter_map(resolve_supporter)
        .filter(|person| seen.insert(person.id.clone()))
        .collect()
}
