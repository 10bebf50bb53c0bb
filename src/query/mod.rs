// src/query/mod.rs
pub mod age;
pub mod lookup;
pub mod retirees;
pub mod validate;
pub mod withdrawals;

pub use age::{age, age_today, today, Age};
pub use lookup::{lookup_latest, Lookup};
pub use retirees::{retiree_records, RetireeFilter, RETIREMENT_AGE};
pub use validate::{validate_identifier, IdentifierError};
pub use withdrawals::{withdrawal_records, SignFilter, WithdrawalFilter};

use crate::model::Record;
use serde::Serialize;

/// A record paired with the age computed for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgedRecord<'a> {
    #[serde(flatten)]
    pub record: &'a Record,
    pub age: Age,
}

impl AsRef<Record> for AgedRecord<'_> {
    fn as_ref(&self) -> &Record {
        self.record
    }
}

/// Case-insensitive substring match on the identifier. An empty needle
/// matches everything; a record without an identifier matches nothing else.
pub(crate) fn identifier_contains(record: &Record, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    match &record.identifier {
        Some(id) => id.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}
