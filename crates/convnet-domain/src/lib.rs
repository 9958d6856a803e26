//! Convnet Domain Layer
//!
//! This crate contains the graph-assembly and weight-computation engine that turns
//! scraped convention records into a weighted influence network. It performs no I/O:
//! records come in already parsed, and an abstract [`InfluenceGraph`] comes out.
//!
//! ## Key Concepts
//!
//! - **Convention**: a dated assembly; amendments belong to exactly one
//! - **Amendment**: a proposed change with one author and several supporters
//! - **Experience weight**: cube-root blend of authored and supported counts
//! - **Temporal factor**: boost for edges far from a person's activity center
//!
//! ## Passes
//!
//! 1. [`GraphAssembler`] scans every record once and collects raw counters
//! 2. [`WeightEngine`] turns counters into profiles and edge weights
//! 3. [`GraphPruner`] removes isolated (and optionally low-degree) nodes
//!
//! [`NetworkBuilder`] runs the three passes in order.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assembler;
pub mod config;
pub mod filter;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod pruner;
pub mod record;
pub mod registry;
pub mod slug;
pub mod weights;

// Re-exports for convenience
pub use assembler::{Assembly, ConventionStat, GraphAssembler, PersonStats};
pub use config::NetworkConfig;
pub use filter::{FilterVerdict, RecordFilter};
pub use graph::{AmendmentNode, Edge, InfluenceGraph, Node, NodeKind, PersonNode, Relation};
pub use metrics::BuildMetrics;
pub use pipeline::{BuildOutput, NetworkBuilder};
pub use pruner::{GraphPruner, PruneReport};
pub use record::{AmendmentRecord, ApplicantDetails, RecordKind, RecordSet, SupporterEntry};
pub use registry::{ConventionRegistry, DEFAULT_YEAR};
pub use weights::{ExperienceProfile, WeightConfig, WeightEngine};
