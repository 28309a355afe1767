//! Configuration management and validation.
//!
//! Holds the run-level settings the CLI resolves before invoking the
//! processor: root directories, worker count, and verbosity-independent
//! behavior toggles.

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_RAW_ROOT, OUTPUT_DIR_NAME};
use crate::error::{HarmonizeError, Result};

/// Run-level configuration shared by all dataset invocations
#[derive(Debug, Clone)]
pub struct HarmonizeConfig {
    /// Directory holding the `<Dataset>_raw_data` trees
    pub raw_root: PathBuf,

    /// Directory under which `Standardized-datasets/` is created
    pub output_root: PathBuf,

    /// Concurrent file ingests per dataset
    pub workers: usize,
}

impl Default for HarmonizeConfig {
    fn default() -> Self {
        Self {
            raw_root: PathBuf::from(DEFAULT_RAW_ROOT),
            output_root: PathBuf::from("."),
            workers: num_cpus::get(),
        }
    }
}

impl HarmonizeConfig {
    pub fn with_raw_root(mut self, raw_root: impl Into<PathBuf>) -> Self {
        self.raw_root = raw_root.into();
        self
    }

    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Directory all harmonized datasets are written under
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(OUTPUT_DIR_NAME)
    }

    /// Raw directory for a dataset, by its declared relative path
    pub fn raw_dir(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.raw_root.join(relative)
    }

    /// Validate settings before processing begins
    pub fn validate(&self) -> Result<()> {
        if !self.raw_root.exists() {
            return Err(HarmonizeError::Configuration {
                message: format!("raw data root does not exist: {}", self.raw_root.display()),
            });
        }
        if !self.raw_root.is_dir() {
            return Err(HarmonizeError::Configuration {
                message: format!("raw data root is not a directory: {}", self.raw_root.display()),
            });
        }
        if self.workers == 0 {
            return Err(HarmonizeError::Configuration {
                message: "worker count must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
