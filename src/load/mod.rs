// src/load/mod.rs
pub mod date_parser;
pub mod month;
pub mod normalize;
pub mod utils;

use crate::config::LoaderConfig;
use crate::model::Dataset;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use glob::{glob, Pattern};
use normalize::{normalize, RawTable};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{info, warn};

/// Conditions that leave the session with no data source at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no CSV files found in {}", .0.display())]
    NoData(PathBuf),
    #[error("cannot list data directory {}: {message}", .dir.display())]
    DataDir { dir: PathBuf, message: String },
}

/// Result of a load: the dataset, the file it came from, and a diagnostic
/// when the file could not be read (the dataset is then empty).
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub dataset: Dataset,
    pub source_name: String,
    pub diagnostic: Option<String>,
}

impl Loaded {
    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty()
    }
}

/// List `*.csv` candidates in `dir`, lexically by file name.
pub fn list_candidates(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let pattern = format!("{}/*.csv", Pattern::escape(&dir.to_string_lossy()));
    let entries = glob(&pattern).map_err(|e| LoadError::DataDir {
        dir: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("cannot read directory entry: {}", e);
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Pick the preferred file if present, else the lexically first candidate.
pub fn select_source(config: &LoaderConfig) -> Result<PathBuf, LoadError> {
    if !config.data_dir.is_dir() {
        return Err(LoadError::DataDir {
            dir: config.data_dir.clone(),
            message: "not a directory".into(),
        });
    }
    let candidates = list_candidates(&config.data_dir)?;
    let preferred = candidates.iter().find(|p| {
        p.file_name()
            .is_some_and(|n| n.to_string_lossy() == config.preferred_file)
    });
    preferred
        .or_else(|| candidates.first())
        .cloned()
        .ok_or_else(|| LoadError::NoData(config.data_dir.clone()))
}

/// Read a whole CSV (with a header row) into memory.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load and normalize one explicit file. A read failure is reported through
/// `Loaded::diagnostic` with an empty dataset, never as an error.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_file<P: AsRef<Path>>(path: P) -> Loaded {
    let path = path.as_ref();
    let source_name = file_name_of(path);

    let table = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))
        .and_then(|f| read_table(BufReader::new(f)));

    match table {
        Ok(table) => {
            let dataset = normalize(table);
            info!(records = dataset.len(), source = %source_name, "data loaded");
            Loaded {
                dataset,
                source_name,
                diagnostic: None,
            }
        }
        Err(err) => {
            let message = format!("Error loading data: {:#}", err);
            warn!(source = %source_name, "{}", message);
            Loaded {
                dataset: Dataset::empty(),
                source_name,
                diagnostic: Some(message),
            }
        }
    }
}

/// Select the source file per `config` and load it.
pub fn load(config: &LoaderConfig) -> Result<Loaded, LoadError> {
    let path = select_source(config)?;
    info!(file = %path.display(), "selected data file");
    Ok(load_file(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,ssnit_records::load=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    const SAMPLE: &str = "\
Unit Holder ID,Contributor Name,Year,Month,Withdrawals,Date_of_Birth,Notes
A1,Ama Mensah,2022,Dec,0,1950-01-10,late
A1,Ama Mensah,2021,Jan,,1950-01-10,
B2,Kofi Boateng,2021,March,-50,not a date,adj
";

    #[test]
    fn prefers_combined_file() -> anyhow::Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        fs::write(dir.path().join("a_first.csv"), SAMPLE)?;
        fs::write(dir.path().join("Combined.csv"), SAMPLE)?;
        fs::write(dir.path().join("notes.txt"), "ignored")?;

        let path = select_source(&LoaderConfig::new(dir.path()))?;
        assert_eq!(path.file_name().unwrap(), "Combined.csv");
        Ok(())
    }

    #[test]
    fn falls_back_to_lexically_first() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("zeta.csv"), SAMPLE)?;
        fs::write(dir.path().join("alpha.csv"), SAMPLE)?;
        fs::write(dir.path().join("Beta.CSV"), SAMPLE)?;

        let path = select_source(&LoaderConfig::new(dir.path()))?;
        assert_eq!(path.file_name().unwrap(), "alpha.csv");

        // the choice does not depend on creation order
        let again = select_source(&LoaderConfig::new(dir.path()))?;
        assert_eq!(path, again);
        Ok(())
    }

    #[test]
    fn no_csv_is_no_data() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("readme.md"), "x")?;
        let err = load(&LoaderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, LoadError::NoData(_)));
        Ok(())
    }

    #[test]
    fn missing_dir_is_reported() {
        let err = select_source(&LoaderConfig::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, LoadError::DataDir { .. }));
    }

    #[test]
    fn loads_and_sorts() -> anyhow::Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        fs::write(dir.path().join("data.csv"), SAMPLE)?;

        let loaded = load(&LoaderConfig::new(dir.path()))?;
        assert_eq!(loaded.source_name, "data.csv");
        assert!(loaded.diagnostic.is_none());
        assert_eq!(loaded.dataset.len(), 3);

        let periods: Vec<_> = loaded
            .dataset
            .records()
            .iter()
            .map(|r| (r.year, r.month_label.clone()))
            .collect();
        assert_eq!(
            periods,
            vec![
                (Some(2021), Some("Jan".to_string())),
                (Some(2021), Some("March".to_string())),
                (Some(2022), Some("Dec".to_string())),
            ]
        );
        let kofi = &loaded.dataset.records()[1];
        assert_eq!(kofi.withdrawals, -50.0);
        assert_eq!(kofi.birth_date, None);
        assert_eq!(loaded.dataset.years(), vec![2021, 2022]);
        Ok(())
    }

    #[test]
    fn unreadable_file_gives_empty_dataset_and_diagnostic() -> anyhow::Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let path = dir.path().join("broken.csv");
        fs::write(&path, b"Unit Holder ID,Year\n\xff\xfe,2020\n")?;

        let loaded = load_file(&path);
        assert!(!loaded.has_data());
        assert_eq!(loaded.source_name, "broken.csv");
        assert!(loaded.diagnostic.is_some());
        Ok(())
    }
}
