//! Pass 3: structural pruning
//!
//! Pruning only changes membership. Counters and weights computed in pass 2 are
//! left exactly as they were.

use crate::config::NetworkConfig;
use crate::graph::{degree_map, Edge, InfluenceGraph, Node};
use std::collections::HashSet;
use tracing::info;

/// What a pruning run removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Nodes without any recorded connection
    pub isolated: usize,
    /// Persons with degree ≤ 1 (only when low-degree pruning is on)
    pub low_degree: usize,
    /// Amendments that lost every edge to low-degree pruning
    pub orphaned: usize,
    /// Edges dropped with a pruned endpoint
    pub edges: usize,
}

/// Removes isolated and, optionally, weakly connected nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphPruner {
    prune_low_degree: bool,
}

impl GraphPruner {
    /// Create a pruner
    pub fn new(prune_low_degree: bool) -> Self {
        Self { prune_low_degree }
    }

    /// Create a pruner from network configuration
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.prune_low_degree)
    }

    /// Prune nodes and edges into the final graph
    pub fn prune(
        &self,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        connected: &HashSet<String>,
    ) -> (InfluenceGraph, PruneReport) {
        let mut report = PruneReport::default();

        let dropped: HashSet<String> = {
            let degrees = degree_map(&edges);
            nodes
                .iter()
                .filter(|node| {
                    let degree = degrees.get(node.id()).copied().unwrap_or(0);
                    if !connected.contains(node.id()) || degree == 0 {
                        report.isolated += 1;
                        return true;
                    }
                    if self.prune_low_degree && matches!(node, Node::Person(_)) && degree <= 1 {
                        report.low_degree += 1;
                        return true;
                    }
                    false
                })
                .map(|node| node.id().to_string())
                .collect()
        };

        let edges_before = edges.len();
        let edges: Vec<Edge> = edges
            .into_iter()
            .filter(|e| !dropped.contains(&e.source) && !dropped.contains(&e.target))
            .collect();
        report.edges = edges_before - edges.len();

        // Dropping persons can strand amendments; persons never lose edges to this.
        let nodes: Vec<Node> = {
            let degrees = degree_map(&edges);
            nodes
                .into_iter()
                .filter(|node| !dropped.contains(node.id()))
                .filter(|node| {
                    let stranded = !degrees.contains_key(node.id());
                    if stranded {
                        report.orphaned += 1;
                    }
                    !stranded
                })
                .collect()
        };

        info!(
            isolated = report.isolated,
            low_degree = report.low_degree,
            orphaned = report.orphaned,
            edges = report.edges,
            "prune pass complete"
        );
        (InfluenceGraph::new(nodes, edges), report)
    }
}
