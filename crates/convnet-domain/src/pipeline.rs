//! Three-pass network build
//!
//! The passes are separated by a hard barrier: no weight is computed before
//! every record has been assembled, and pruning only starts once every weight
//! is final.

use crate::assembler::GraphAssembler;
use crate::config::NetworkConfig;
use crate::filter::RecordFilter;
use crate::graph::InfluenceGraph;
use crate::metrics::BuildMetrics;
use crate::pruner::GraphPruner;
use crate::record::AmendmentRecord;
use crate::registry::ConventionRegistry;
use crate::weights::{ExperienceProfile, WeightConfig, WeightEngine};
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Result of a network build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Final, pruned graph
    pub graph: InfluenceGraph,

    /// Experience profile of every person seen in pass 1, pruned or not
    pub profiles: HashMap<String, ExperienceProfile>,

    /// What was kept, skipped and pruned
    pub metrics: BuildMetrics,
}

/// Runs assembly, weighting and pruning over a record collection
///
/// # Examples
///
/// ```
/// use convnet_domain::{AmendmentRecord, NetworkBuilder, RecordSet};
///
/// let records = RecordSet::from(vec![
///     AmendmentRecord::new("51bdk/A-01", "51bdk")
///         .with_author("Anna Muster", true)
///         .with_supporter("Ben Beispiel")
///         .with_supporter("Clara Test"),
/// ]);
///
/// let output = NetworkBuilder::default_config().build(&records);
/// assert_eq!(output.graph.node_count(), 4);
/// assert_eq!(output.graph.edge_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    config: NetworkConfig,
    registry: ConventionRegistry,
    weights: WeightConfig,
}

impl NetworkBuilder {
    /// Create a builder
    pub fn new(config: NetworkConfig, registry: ConventionRegistry, weights: WeightConfig) -> Self {
        Self {
            config,
            registry,
            weights,
        }
    }

    /// Builder with default configuration and the built-in registry
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Network configuration in use
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Convention registry in use
    pub fn registry(&self) -> &ConventionRegistry {
        &self.registry
    }

    /// Run all three passes
    pub fn build<'r, I>(&self, records: I) -> BuildOutput
    where
        I: IntoIterator<Item = &'r AmendmentRecord>,
    {
        let start = Instant::now();

        let filter = RecordFilter::new(&self.config);
        let mut assembly = GraphAssembler::new(&filter).assemble(records);

        let engine = WeightEngine::new(&self.registry, self.weights.clone());
        let profiles = engine.apply(&mut assembly);

        let pruner = GraphPruner::from_config(&self.config);
        let (graph, report) = pruner.prune(assembly.nodes, assembly.edges, &assembly.connected);

        let mut metrics = assembly.metrics;
        metrics.isolated_pruned = report.isolated;
        metrics.low_degree_pruned = report.low_degree;
        metrics.orphaned_pruned = report.orphaned;
        metrics.edges_pruned = report.edges;
        metrics.elapsed = start.elapsed();

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            elapsed_ms = metrics.elapsed.as_millis() as u64,
            "network build complete"
        );

        BuildOutput {
            graph,
            profiles,
            metrics,
        }
    }
}
