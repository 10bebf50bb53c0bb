// src/config.rs

use std::path::PathBuf;

/// File picked over all others when present in the data directory.
pub const DEFAULT_PREFERRED_FILE: &str = "Combined.csv";

/// Where the loader looks for data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub data_dir: PathBuf,
    pub preferred_file: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            preferred_file: DEFAULT_PREFERRED_FILE.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_preferred_file(mut self, name: impl Into<String>) -> Self {
        self.preferred_file = name.into();
        self
    }
}
