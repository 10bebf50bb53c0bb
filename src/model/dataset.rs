// src/model/dataset.rs

use super::record::{sort_chronologically, Record};

/// A loaded, normalized table. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset and put `records` in chronological order.
    pub fn new(headers: Vec<String>, mut records: Vec<Record>) -> Self {
        sort_chronologically(&mut records);
        Self { headers, records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Header names in source file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct years present in the data.
    pub fn years(&self) -> Vec<i32> {
        distinct_years(self.records.iter())
    }
}

pub(crate) fn distinct_years<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<i32> {
    let mut years: Vec<i32> = records.filter_map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}
