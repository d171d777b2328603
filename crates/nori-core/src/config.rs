//! Ingest configuration
//!
//! A small `nori.toml` in the working directory sets the directory layout
//! the ingest command uses. CLI arguments override file values, which
//! override the built-in defaults; the merge itself happens in the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Config file name discovered in the working directory.
pub const CONFIG_FILE: &str = "nori.toml";

/// Directory layout for batch ingestion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Directory scanned for incoming `.xml` documents.
    pub input_dir: PathBuf,
    /// Directory receiving the per-entity record files.
    pub output_dir: PathBuf,
    /// When set, successfully processed documents are moved here.
    pub processed_dir: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/incoming"),
            output_dir: PathBuf::from("data/records"),
            processed_dir: None,
        }
    }
}

impl IngestConfig {
    /// Load configuration from a specific TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::config(format!("invalid config {}: {e}", path.display()))
        })
    }

    /// Load `nori.toml` from `dir` when present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            debug!("loading config from {}", candidate.display());
            Self::load(&candidate)
        } else {
            debug!("no {CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_without_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = IngestConfig::discover(dir.path()).unwrap();
        assert_eq!(config, IngestConfig::default());
        assert_eq!(config.input_dir, PathBuf::from("data/incoming"));
        assert_eq!(config.processed_dir, None);
    }

    #[test]
    fn partial_file_fills_remaining_fields_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"input_dir = "inbox"
processed_dir = "done"
"#,
        )
        .unwrap();

        let config = IngestConfig::discover(dir.path()).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("inbox"));
        assert_eq!(config.output_dir, PathBuf::from("data/records"));
        assert_eq!(config.processed_dir, Some(PathBuf::from("done")));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "input_dir = [not toml").unwrap();

        let err = IngestConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
