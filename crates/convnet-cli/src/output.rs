//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use convnet_domain::{BuildMetrics, BuildOutput, ConventionRegistry};
use convnet_export::ExportFormat;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// One line of the experience ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRow {
    /// Person node id
    pub id: String,
    /// Display name, when the person survived pruning
    pub label: Option<String>,
    /// Number of conventions participated in
    pub conventions: usize,
    /// Total experience
    pub total: f64,
    /// Experience-weighted mean convention year
    pub avg_year: f64,
    /// Node weight, when the person survived pruning
    pub weight: Option<i64>,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of a build command.
    pub fn format_build(&self, output: &BuildOutput, path: &Path, format: ExportFormat) -> Result<String> {
        let graph = &output.graph;
        match self.format {
            OutputFormat::Json => {
                let doc = serde_json::json!({
                    "output": path.display().to_string(),
                    "format": format.to_string(),
                    "nodes": graph.node_count(),
                    "amendments": graph.amendments().count(),
                    "persons": graph.persons().count(),
                    "edges": graph.edge_count(),
                    "metrics": metrics_json(&output.metrics),
                });
                Ok(serde_json::to_string_pretty(&doc)?)
            }
            OutputFormat::Table => {
                let mut lines = vec![self.success(&format!(
                    "Wrote {} ({} nodes, {} edges) to {}",
                    format,
                    graph.node_count(),
                    graph.edge_count(),
                    path.display()
                ))];
                if graph.node_count() == 0 {
                    lines.push(self.warning("The network is empty; no record met the selection criteria"));
                }
                lines.push(String::new());
                lines.push(output.metrics.summary());
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(path.display().to_string()),
        }
    }

    /// Format the experience ranking.
    pub fn format_profiles(&self, rows: &[ProfileRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_profiles_json(rows),
            OutputFormat::Table => self.format_profiles_table(rows),
            OutputFormat::Quiet => Ok(rows.iter().map(|r| r.id.as_str()).collect::<Vec<_>>().join("\n")),
        }
    }

    fn format_profiles_json(&self, rows: &[ProfileRow]) -> Result<String> {
        let json_rows: Vec<serde_json::Value> = rows
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id,
                    "label": r.label,
                    "conventions": r.conventions,
                    "total": r.total,
                    "avg_year": r.avg_year,
                    "weight": r.weight,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_rows)?)
    }

    fn format_profiles_table(&self, rows: &[ProfileRow]) -> Result<String> {
        if rows.is_empty() {
            return Ok(self.colorize("No persons found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Person", "Name", "Conventions", "Experience", "Avg. year", "Weight"]);

        for (rank, row) in rows.iter().enumerate() {
            builder.push_record([
                (rank + 1).to_string(),
                row.id.clone(),
                row.label.clone().unwrap_or_else(|| "(pruned)".to_string()),
                row.conventions.to_string(),
                format!("{:.3}", row.total),
                format!("{:.2}", row.avg_year),
                row.weight.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string()),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Format the convention registry.
    pub fn format_registry(&self, registry: &ConventionRegistry) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(registry)?),
            OutputFormat::Quiet => Ok(registry.iter().map(|(id, _)| id).collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Convention", "Year"]);
                for (id, year) in registry.iter() {
                    builder.push_record([id.to_string(), format!("{:.2}", year)]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!(
                    "{}\n{}",
                    table,
                    self.info(&format!("Unregistered conventions use {:.2}", registry.default_year))
                ))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn metrics_json(metrics: &BuildMetrics) -> serde_json::Value {
    serde_json::json!({
        "records_scanned": metrics.records_scanned,
        "records_accepted": metrics.records_accepted,
        "rejected": {
            "out_of_scope": metrics.out_of_scope,
            "excluded_kind": metrics.excluded_kind,
            "below_threshold": metrics.below_threshold,
        },
        "skipped": {
            "institutional_authors": metrics.institutional_authors,
            "decision_stamps": metrics.decision_stamps,
            "blank_supporters": metrics.blank_supporters,
            "duplicate_pairs": metrics.duplicate_pairs,
        },
        "pruned": {
            "isolated": metrics.isolated_pruned,
            "low_degree": metrics.low_degree_pruned,
            "orphaned": metrics.orphaned_pruned,
            "edges": metrics.edges_pruned,
        },
        "elapsed_ms": metrics.elapsed.as_millis() as u64,
    })
}
