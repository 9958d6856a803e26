//! Pass 1: graph assembly
//!
//! Scans every record once, in input order, creating amendment and person nodes,
//! deduplicated edges, and the raw counters the weight engine needs. Nothing here
//! computes a weight; that has to wait until every record has been seen.

use crate::filter::{FilterVerdict, RecordFilter};
use crate::graph::{AmendmentNode, Edge, Node, PersonNode, Relation};
use crate::metrics::BuildMetrics;
use crate::record::AmendmentRecord;
use crate::slug::{is_decision_stamp, resolve_author, resolve_supporter, PersonRef};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// Participation of one person in one convention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConventionStat {
    /// Amendments co-signed
    pub supports: u32,
    /// Amendments authored
    pub authored: u32,
}

/// Person id → convention id → participation
///
/// Ordered maps keep every downstream sum in a fixed order.
pub type PersonStats = BTreeMap<String, BTreeMap<String, ConventionStat>>;

/// Raw result of pass 1
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// Nodes in creation order; weights are still zero
    pub nodes: Vec<Node>,

    /// Edges in creation order; weights are still zero
    pub edges: Vec<Edge>,

    /// Amendment id → distinct supporters linked
    pub supporter_counts: HashMap<String, u64>,

    /// Per-person, per-convention participation
    pub person_stats: PersonStats,

    /// Nodes that took part in at least one edge
    pub connected: HashSet<String>,

    /// Filter and skip counters
    pub metrics: BuildMetrics,
}

/// Builds the raw graph from records
///
/// Within a record, authorship is always processed before supporters, so when a
/// person both authors and supports an amendment the `authored` edge wins.
pub struct GraphAssembler<'a> {
    filter: &'a RecordFilter,
    index: HashMap<String, usize>,
    seen_pairs: HashSet<(String, String)>,
    assembly: Assembly,
}

impl<'a> GraphAssembler<'a> {
    /// Create an assembler using the given filter
    pub fn new(filter: &'a RecordFilter) -> Self {
        Self {
            filter,
            index: HashMap::new(),
            seen_pairs: HashSet::new(),
            assembly: Assembly::default(),
        }
    }

    /// Run pass 1 over all records
    pub fn assemble<'r, I>(mut self, records: I) -> Assembly
    where
        I: IntoIterator<Item = &'r AmendmentRecord>,
    {
        for record in records {
            let verdict = self.filter.verdict(record);
            self.assembly.metrics.record_verdict(verdict);

            if verdict != FilterVerdict::Accepted {
                debug!(record = %record.id, ?verdict, "record skipped");
                continue;
            }
            self.process(record);
        }

        info!(
            nodes = self.assembly.nodes.len(),
            edges = self.assembly.edges.len(),
            persons = self.assembly.person_stats.len(),
            "assembly pass complete"
        );
        self.assembly
    }

    fn process(&mut self, record: &AmendmentRecord) {
        self.ensure_amendment(record);

        match resolve_author(record) {
            Some(author) => {
                self.ensure_person(&author);
                self.link(&author.id, record, Relation::Authored);
            }
            None if !record.is_person && !record.author.trim().is_empty() => {
                self.assembly.metrics.institutional_authors += 1;
            }
            None => {}
        }

        for entry in &record.supporters {
            let Some(supporter) = resolve_supporter(entry) else {
                if is_decision_stamp(&entry.name) {
                    self.assembly.metrics.decision_stamps += 1;
                } else {
                    self.assembly.metrics.blank_supporters += 1;
                }
                continue;
            };

            self.ensure_person(&supporter);
            self.link(&supporter.id, record, Relation::Supports);
        }
    }

    fn ensure_amendment(&mut self, record: &AmendmentRecord) {
        if self.index.contains_key(&record.id) {
            return;
        }

        self.index
            .insert(record.id.clone(), self.assembly.nodes.len());
        self.assembly.nodes.push(Node::Amendment(AmendmentNode {
            id: record.id.clone(),
            label: record.label.clone(),
            convention: record.convention.clone(),
            url: record.url.clone(),
            weight: 0,
        }));
        self.assembly
            .supporter_counts
            .entry(record.id.clone())
            .or_insert(0);
    }

    fn ensure_person(&mut self, person: &PersonRef) {
        if let Some(&idx) = self.index.get(&person.id) {
            if let Node::Person(existing) = &mut self.assembly.nodes[idx] {
                if !person.kv.is_empty() {
                    existing.kv = person.kv.clone();
                }
            }
            return;
        }

        self.index
            .insert(person.id.clone(), self.assembly.nodes.len());
        self.assembly.nodes.push(Node::Person(PersonNode {
            id: person.id.clone(),
            label: person.label.clone(),
            kv: person.kv.clone(),
            weight: 0,
        }));
    }

    /// Add an edge unless the pair already exists. Counters move with the edge.
    fn link(&mut self, person_id: &str, record: &AmendmentRecord, relation: Relation) {
        let pair = (person_id.to_string(), record.id.clone());
        if !self.seen_pairs.insert(pair) {
            debug!(person = person_id, amendment = %record.id, %relation, "duplicate pair dropped");
            self.assembly.metrics.duplicate_pairs += 1;
            return;
        }

        self.assembly.edges.push(Edge {
            source: person_id.to_string(),
            target: record.id.clone(),
            relation,
            convention: record.convention.clone(),
            weight: 0.0,
        });
        self.assembly.connected.insert(person_id.to_string());
        self.assembly.connected.insert(record.id.clone());

        let stat = self
            .assembly
            .person_stats
            .entry(person_id.to_string())
            .or_default()
            .entry(record.convention.clone())
            .or_default();

        match relation {
            Relation::Authored => stat.authored += 1,
            Relation::Supports => {
                stat.supports += 1;
                *self
                    .assembly
                    .supporter_counts
                    .entry(record.id.clone())
                    .or_insert(0) += 1;
            }
        }
    }
}
