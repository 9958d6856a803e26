//! Build command implementation.

use crate::cli::{BuildArgs, NetworkArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::input::load_records;
use crate::output::Formatter;
use convnet_domain::{BuildOutput, NetworkBuilder};
use convnet_export::export_graph;
use std::path::Path;
use tracing::warn;

/// Build a network from configuration and command-line overrides.
pub fn build_network(input: &Path, network: &NetworkArgs, config: &Config) -> Result<BuildOutput> {
    let network = network.apply(config.network.clone());
    network.validate().map_err(CliError::Config)?;

    let records = load_records(input)?;
    let builder = NetworkBuilder::new(network, config.registry(), config.weights.clone());
    let output = builder.build(&records);

    for convention in &builder.config().conventions {
        if !builder.registry().contains(convention) {
            warn!(%convention, year = builder.registry().default_year, "convention not in registry, using default year");
        }
    }
    Ok(output)
}

/// Execute the build command.
pub fn execute_build(args: BuildArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let output = build_network(&args.input, &args.network, config)?;

    let format = args.export_format();
    export_graph(&output.graph, &args.output, format)?;

    println!("{}", formatter.format_build(&output, &args.output, format)?);
    Ok(())
}
