//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use convnet_domain::NetworkConfig;
use convnet_export::ExportFormat;
use std::path::PathBuf;

/// convnet - Build influence networks from party convention amendments.
#[derive(Debug, Parser)]
#[command(name = "convnet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CONVNET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (minimal)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the network and write it to a graph file
    Build(BuildArgs),

    /// Show the most experienced persons of a network
    Inspect(InspectArgs),

    /// List the convention registry in effect
    Conventions,
}

/// Options shared by every command that builds a network.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NetworkArgs {
    /// Restrict to a convention id (repeatable)
    #[arg(long = "convention", value_name = "ID")]
    pub conventions: Vec<String>,

    /// Drop persons connected to a single amendment
    #[arg(long)]
    pub prune_low_degree: bool,

    /// Ignore records scraped as motions
    #[arg(long)]
    pub exclude_motions: bool,
}

impl NetworkArgs {
    /// Apply command-line overrides on top of configured settings.
    pub fn apply(&self, mut config: NetworkConfig) -> NetworkConfig {
        if !self.conventions.is_empty() {
            config.conventions = self.conventions.clone();
        }
        if self.prune_low_degree {
            config.prune_low_degree = true;
        }
        if self.exclude_motions {
            config.include_motions = false;
        }
        config
    }
}

/// Arguments for the build command.
#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// Amendment records (.json, .yaml or .yml)
    pub input: PathBuf,

    /// Graph file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Graph format (inferred from the output extension when omitted)
    #[arg(short, long, value_enum)]
    pub to: Option<GraphFormatArg>,

    #[command(flatten)]
    pub network: NetworkArgs,
}

impl BuildArgs {
    /// Resolve the graph format: explicit flag, then extension, then GEXF.
    pub fn export_format(&self) -> ExportFormat {
        self.to
            .map(Into::into)
            .or_else(|| ExportFormat::from_path(&self.output))
            .unwrap_or_default()
    }
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Amendment records (.json, .yaml or .yml)
    pub input: PathBuf,

    /// Maximum number of persons to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    #[command(flatten)]
    pub network: NetworkArgs,
}

/// Graph file format argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum GraphFormatArg {
    /// GEXF 1.2draft
    Gexf,
    /// JSON property graph
    Json,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<GraphFormatArg> for ExportFormat {
    fn from(format: GraphFormatArg) -> Self {
        match format {
            GraphFormatArg::Gexf => ExportFormat::Gexf,
            GraphFormatArg::Json => ExportFormat::Json,
        }
    }
}
