//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::commands::build::build_network;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, ProfileRow};
use convnet_domain::{BuildOutput, Node};
use std::cmp::Ordering;

/// Rank persons by total experience, highest first; ties broken by id.
pub fn rank_profiles(output: &BuildOutput, limit: usize) -> Vec<ProfileRow> {
    let mut rows: Vec<ProfileRow> = output
        .profiles
        .iter()
        .map(|(id, profile)| {
            let node = match output.graph.node(id) {
                Some(Node::Person(p)) => Some(p),
                _ => None,
            };
            ProfileRow {
                id: id.clone(),
                label: node.map(|p| p.label.clone()),
                conventions: profile.per_convention.len(),
                total: profile.total,
                avg_year: profile.avg_year,
                weight: node.map(|p| p.weight),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    rows.truncate(limit);
    rows
}

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let output = build_network(&args.input, &args.network, config)?;
    let rows = rank_profiles(&output, args.limit);
    println!("{}", formatter.format_profiles(&rows)?);
    Ok(())
}
