//! Environment-based directory configuration.
//!
//! The environment is read once, at construction; the resulting
//! [`DataPaths`] value is passed into callers explicitly so the pipeline
//! itself carries no ambient process state.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::ConfigError;

/// Environment variable naming the raw-input directory.
pub const RAW_DIR_VAR: &str = "DATA_DIR_RAW";

/// Environment variable naming the processed-output directory.
pub const PROCESSED_DIR_VAR: &str = "DATA_DIR_PROCESSED";

const DEFAULT_RAW_DIR: &str = "data/raw";
const DEFAULT_PROCESSED_DIR: &str = "data/processed";

/// The two directories the pipeline reads from and writes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPaths {
    /// Raw input directory.
    pub raw: PathBuf,
    /// Processed output directory.
    pub processed: PathBuf,
}

impl DataPaths {
    /// Resolve the data directories against a project root.
    ///
    /// Reads `DATA_DIR_RAW` and `DATA_DIR_PROCESSED`, falling back to
    /// `data/raw` and `data/processed`, and creates the directories if
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn from_env(project_root: &Path) -> io::Result<Self> {
        let raw_rel = env::var(RAW_DIR_VAR).unwrap_or_else(|_| DEFAULT_RAW_DIR.to_string());
        let processed_rel =
            env::var(PROCESSED_DIR_VAR).unwrap_or_else(|_| DEFAULT_PROCESSED_DIR.to_string());

        let raw = project_root.join(raw_rel);
        let processed = project_root.join(processed_rel);

        std::fs::create_dir_all(&raw)?;
        std::fs::create_dir_all(&processed)?;
        debug!(
            "data directories: raw={}, processed={}",
            raw.display(),
            processed.display()
        );

        Ok(Self { raw, processed })
    }
}

/// Read a required environment variable.
///
/// # Errors
///
/// Returns [`ConfigError::MissingVar`] when the variable is unset or
/// empty.
pub fn require_env(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths_created() {
        let root = TempDir::new().unwrap();
        let paths = DataPaths::from_env(root.path()).unwrap();

        assert!(paths.raw.ends_with("data/raw") || paths.raw.exists());
        assert!(paths.raw.is_dir());
        assert!(paths.processed.is_dir());
    }

    #[test]
    fn test_require_env_present() {
        env::set_var("QUANTPREP_TEST_PRESENT", "value");
        assert_eq!(require_env("QUANTPREP_TEST_PRESENT").unwrap(), "value");
        env::remove_var("QUANTPREP_TEST_PRESENT");
    }

    #[test]
    fn test_require_env_missing() {
        let result = require_env("QUANTPREP_TEST_DEFINITELY_MISSING");
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
    }

    #[test]
    fn test_require_env_empty_counts_as_missing() {
        env::set_var("QUANTPREP_TEST_EMPTY", "");
        let result = require_env("QUANTPREP_TEST_EMPTY");
        assert!(matches!(result, Err(ConfigError::MissingVar(_))));
        env::remove_var("QUANTPREP_TEST_EMPTY");
    }
}
