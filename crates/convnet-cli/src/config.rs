//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use convnet_domain::{ConventionRegistry, NetworkConfig, WeightConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Record selection and pruning
    #[serde(default)]
    pub network: NetworkConfig,

    /// Weight constants
    #[serde(default)]
    pub weights: WeightConfig,

    /// Convention years, layered over the built-in table
    #[serde(default)]
    pub registry: RegistrySection,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// `[registry]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySection {
    /// Year for unregistered conventions
    ///
    /// Overriding it departs from the 2020.0 reference year for unknown
    /// conventions. A person with zero total experience always gets 2020.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_year: Option<f64>,

    /// Convention id → fractional year
    #[serde(default)]
    pub years: BTreeMap<String, f64>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".convnet").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.convnet/config.toml` is
    /// used when present, otherwise the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Config file '{}' does not exist",
                    path.display()
                )));
            }
            return Self::load_from(path);
        }

        match Self::path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            Ok(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => {
                warn!(error = %e, "config lookup failed, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.network.validate().map_err(CliError::Config)?;
        self.weights.validate().map_err(CliError::Config)?;
        self.registry().validate().map_err(CliError::Config)?;
        Ok(())
    }

    /// Effective convention registry: built-in table with configured entries on top.
    pub fn registry(&self) -> ConventionRegistry {
        let mut registry = ConventionRegistry::default();
        if let Some(year) = self.registry.default_year {
            registry.default_year = year;
        }
        registry.extend(self.registry.years.iter().map(|(id, year)| (id.as_str(), *year)));
        registry
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.network.include_motions);
        assert_eq!(config.registry().year("51bdk"), 2018.89);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [network]
            prune_low_degree = true
            conventions = ["50bdk", "51bdk"]

            [weights]
            authored_edge_multiplier = 3.0

            [registry]
            default_year = 2021.0

            [registry.years]
            50bdk = 2024.9
            51bdk = 2019.0

            [settings]
            color = false
            format = "json"
            "#,
        )
        .unwrap();

        assert!(config.network.prune_low_degree);
        assert!(config.network.include_motions);
        assert_eq!(config.network.conventions.len(), 2);
        assert_eq!(config.weights.authored_edge_multiplier, 3.0);
        assert_eq!(config.weights.authorship_factor, 5.0);
        assert!(!config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Json);

        let registry = config.registry();
        assert_eq!(registry.year("50bdk"), 2024.9);
        assert_eq!(registry.year("51bdk"), 2019.0);
        assert_eq!(registry.year("LDK1"), 2021.0);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.network.prune_low_degree);
        assert!(config.settings.color);
        assert_eq!(config.registry().len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[network]\ninclude_motions = false").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.network.include_motions);
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/convnet.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_invalid_registry_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[registry.years]\nbroken = 0.0").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[network\nprune_low_degree = ").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Toml(_))));
    }
}
