//! Conventions command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the conventions command.
pub fn execute_conventions(config: &Config, formatter: &Formatter) -> Result<()> {
    let registry = config.registry();
    println!("{}", formatter.format_registry(&registry)?);
    Ok(())
}
