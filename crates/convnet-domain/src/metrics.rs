//! Metrics collected during a network build

use crate::filter::FilterVerdict;
use std::time::Duration;

/// Counters describing what a build kept, skipped and pruned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildMetrics {
    /// Records offered to the assembler
    pub records_scanned: usize,

    /// Records that entered the graph
    pub records_accepted: usize,

    /// Records outside the configured convention set
    pub out_of_scope: usize,

    /// Records of an excluded kind
    pub excluded_kind: usize,

    /// Records with fewer than two retained supporters
    pub below_threshold: usize,

    /// Accepted records whose author is an institution
    pub institutional_authors: usize,

    /// Supporter entries skipped as decision-date stamps
    pub decision_stamps: usize,

    /// Supporter entries skipped for a blank or unusable name
    pub blank_supporters: usize,

    /// Relations dropped because the (person, amendment) pair already had an edge
    pub duplicate_pairs: usize,

    /// Nodes removed for having no connections
    pub isolated_pruned: usize,

    /// Persons removed by low-degree pruning
    pub low_degree_pruned: usize,

    /// Amendments left without edges after low-degree pruning
    pub orphaned_pruned: usize,

    /// Edges removed together with a pruned endpoint
    pub edges_pruned: usize,

    /// Wall time of the whole build
    pub elapsed: Duration,
}

impl BuildMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the filter's decision for one record
    pub fn record_verdict(&mut self, verdict: FilterVerdict) {
        self.records_scanned += 1;
        match verdict {
            FilterVerdict::Accepted => self.records_accepted += 1,
            FilterVerdict::OutOfScope => self.out_of_scope += 1,
            FilterVerdict::ExcludedKind => self.excluded_kind += 1,
            FilterVerdict::TooFewSupporters { .. } => self.below_threshold += 1,
        }
    }

    /// Records that did not enter the graph
    pub fn total_rejected(&self) -> usize {
        self.out_of_scope + self.excluded_kind + self.below_threshold
    }

    /// Nodes removed across all pruning steps
    pub fn total_pruned(&self) -> usize {
        self.isolated_pruned + self.low_degree_pruned + self.orphaned_pruned
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Build Metrics Summary".to_string(),
            "=====================".to_string(),
            format!("Records scanned: {}", self.records_scanned),
            format!("Records accepted: {}", self.records_accepted),
            format!("Elapsed: {}ms", self.elapsed.as_millis()),
        ];

        if self.total_rejected() > 0 {
            lines.push(String::new());
            lines.push("Rejected records:".to_string());
            lines.push(format!("  Out of scope: {}", self.out_of_scope));
            lines.push(format!("  Excluded kind: {}", self.excluded_kind));
            lines.push(format!("  Below supporter threshold: {}", self.below_threshold));
            lines.push(format!("  Total: {}", self.total_rejected()));
        }

        lines.push(String::new());
        lines.push("Skipped roles:".to_string());
        lines.push(format!("  Institutional authors: {}", self.institutional_authors));
        lines.push(format!("  Decision stamps: {}", self.decision_stamps));
        lines.push(format!("  Blank supporters: {}", self.blank_supporters));
        lines.push(format!("  Duplicate pairs: {}", self.duplicate_pairs));

        if self.total_pruned() > 0 || self.edges_pruned > 0 {
            lines.push(String::new());
            lines.push("Pruned:".to_string());
            lines.push(format!("  Isolated nodes: {}", self.isolated_pruned));
            lines.push(format!("  Low-degree persons: {}", self.low_degree_pruned));
            lines.push(format!("  Orphaned amendments: {}", self.orphaned_pruned));
            lines.push(format!("  Edges: {}", self.edges_pruned));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = BuildMetrics::new();
        assert_eq!(metrics.records_scanned, 0);
        assert_eq!(metrics.total_rejected(), 0);
        assert_eq!(metrics.total_pruned(), 0);
    }

    #[test]
    fn test_record_verdict() {
        let mut metrics = BuildMetrics::new();
        metrics.record_verdict(FilterVerdict::Accepted);
        metrics.record_verdict(FilterVerdict::OutOfScope);
        metrics.record_verdict(FilterVerdict::TooFewSupporters { retained: 1 });
        metrics.record_verdict(FilterVerdict::TooFewSupporters { retained: 0 });
        metrics.record_verdict(FilterVerdict::ExcludedKind);

        assert_eq!(metrics.records_scanned, 5);
        assert_eq!(metrics.records_accepted, 1);
        assert_eq!(metrics.below_threshold, 2);
        assert_eq!(metrics.total_rejected(), 4);
    }

    #[test]
    fn test_summary() {
        let mut metrics = BuildMetrics::new();
        metrics.record_verdict(FilterVerdict::Accepted);
        metrics.record_verdict(FilterVerdict::TooFewSupporters { retained: 1 });
        metrics.decision_stamps = 2;
        metrics.isolated_pruned = 3;

        let summary = metrics.summary();
        assert!(summary.contains("Records scanned: 2"));
        assert!(summary.contains("Below supporter threshold: 1"));
        assert!(summary.contains("Decision stamps: 2"));
        assert!(summary.contains("Isolated nodes: 3"));
    }

    #[test]
    fn test_summary_omits_empty_sections() {
        let summary = BuildMetrics::new().summary();
        assert!(!summary.contains("Rejected records"));
        assert!(!summary.contains("Pruned:"));
    }
}
