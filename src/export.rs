// src/export.rs

use crate::model::Record;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

/// What is being exported; decides the default file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportKind {
    LatestRecord(String),
    AllRecords(String),
    Withdrawals,
    Retirees,
}

impl ExportKind {
    pub fn file_name(&self) -> String {
        match self {
            ExportKind::LatestRecord(id) => format!("UnitHolder_{}_latest_record.csv", id),
            ExportKind::AllRecords(id) => format!("UnitHolder_{}_all_records.csv", id),
            ExportKind::Withdrawals => "withdrawal_records.csv".to_string(),
            ExportKind::Retirees => "retiree_records.csv".to_string(),
        }
    }
}

/// Write `headers` then each record's source fields, in source column order.
/// The month column carries the label as it appeared in the input.
pub fn write_records<'a, W, I, R>(headers: &[String], records: I, writer: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a R>,
    R: AsRef<Record> + 'a,
{
    let mut wtr = WriterBuilder::new().flexible(false).from_writer(writer);
    wtr.write_record(headers).context("writing CSV header")?;

    let mut written = 0;
    for row in records {
        let record = row.as_ref();
        let fields = record
            .raw
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat(""))
            .take(headers.len());
        wtr.write_record(fields)
            .with_context(|| format!("writing CSV row {}", written))?;
        written += 1;
    }
    wtr.flush().context("flushing CSV writer")?;
    Ok(written)
}

/// Export into `dir` under the default name for `kind`; returns the path.
pub fn export_to_dir<'a, I, R>(
    dir: &Path,
    kind: &ExportKind,
    headers: &[String],
    records: I,
) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a R>,
    R: AsRef<Record> + 'a,
{
    fs::create_dir_all(dir).with_context(|| format!("creating export directory {:?}", dir))?;
    let path = dir.join(kind.file_name());
    export_to_path(&path, headers, records)?;
    Ok(path)
}

pub fn export_to_path<'a, I, R>(path: &Path, headers: &[String], records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a R>,
    R: AsRef<Record> + 'a,
{
    let file = File::create(path).with_context(|| format!("creating export file {:?}", path))?;
    let written = write_records(headers, records, BufWriter::new(file))?;
    info!(path = %path.display(), rows = written, "exported records");
    Ok(written)
}
