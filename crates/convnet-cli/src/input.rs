//! Record loading.

use crate::error::{CliError, Result};
use convnet_domain::RecordSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load amendment records from a `.json`, `.yaml` or `.yml` file.
///
/// The document is a mapping from amendment id to record; order is preserved.
/// An empty file yields an empty record set.
pub fn load_records(path: &Path) -> Result<RecordSet> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let contents = fs::read_to_string(path).map_err(|e| {
        CliError::InvalidInput(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    let records = if contents.trim().is_empty() {
        RecordSet::default()
    } else {
        match extension.as_str() {
            "json" => serde_json::from_str(&contents)?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)?,
            other => {
                return Err(CliError::InvalidInput(format!(
                    "Unsupported input extension '{}' (expected json, yaml or yml)",
                    other
                )))
            }
        }
    };

    info!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "records.yml",
            "51bdk/A-01:\n  convention: 51bdk\n  author: Anna Muster\n  isprs: true\n  supporters:\n    - name: Ben\n    - name: Clara\n",
        );

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records.records()[0];
        assert_eq!(record.id, "51bdk/A-01");
        assert!(record.is_person);
        assert_eq!(record.supporters.len(), 2);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "records.JSON",
            r#"{"b": {"convention": "51bdk"}, "a": {"convention": "50bdk"}}"#,
        );

        let records = load_records(&path).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "records.yaml", "\n");
        assert!(load_records(&path).unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "records.csv", "id,convention\n");
        assert!(matches!(load_records(&path), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_records(Path::new("/nonexistent/records.json"));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "records.json", "{ not json");
        assert!(matches!(load_records(&path), Err(CliError::Json(_))));
    }
}
