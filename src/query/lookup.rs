use crate::model::{dataset::distinct_years, sort_chronologically, Dataset, Record};
use std::fmt::Display;

/// Every record held for one identifier, oldest first, and the latest one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lookup<'a> {
    pub latest: Option<&'a Record>,
    pub history: Vec<&'a Record>,
}

impl<'a> Lookup<'a> {
    pub fn is_found(&self) -> bool {
        self.latest.is_some()
    }

    /// Sorted distinct years across the history.
    pub fn available_years(&self) -> Vec<i32> {
        distinct_years(self.history.iter().copied())
    }
}

/// Find all records whose identifier equals `identifier` once both sides
/// are rendered as text and trimmed. The latest record is the last one
/// after sorting by `(year, month_rank)`.
pub fn lookup_latest<'a, I: Display>(dataset: &'a Dataset, identifier: I) -> Lookup<'a> {
    let wanted = identifier.to_string();
    let wanted = wanted.trim();

    let mut history: Vec<&Record> = dataset
        .records()
        .iter()
        .filter(|r| r.identifier.as_deref().map(str::trim) == Some(wanted))
        .collect();
    sort_chronologically(&mut history);

    Lookup {
        latest: history.last().copied(),
        history,
    }
}
