use super::{age, identifier_contains, AgedRecord};
use crate::model::{sort_chronologically, Dataset};
use chrono::NaiveDate;

/// Age from which a record counts as a retiree.
pub const RETIREMENT_AGE: i32 = 60;
pub const DEFAULT_MAX_AGE: i32 = 100;

/// Narrowing applied on top of `retiree_records`. The age range is inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetireeFilter {
    pub identifier: Option<String>,
    pub min_age: i32,
    pub max_age: i32,
}

impl Default for RetireeFilter {
    fn default() -> Self {
        Self {
            identifier: None,
            min_age: RETIREMENT_AGE,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl RetireeFilter {
    pub fn matches(&self, row: &AgedRecord<'_>) -> bool {
        let in_range = row
            .age
            .years()
            .is_some_and(|y| (self.min_age..=self.max_age).contains(&y));
        in_range
            && self
                .identifier
                .as_deref()
                .map_or(true, |needle| identifier_contains(row.record, needle))
    }

    pub fn apply<'a>(&self, rows: &[AgedRecord<'a>]) -> Vec<AgedRecord<'a>> {
        rows.iter().filter(|r| self.matches(r)).copied().collect()
    }
}

/// Every record whose holder is at least `RETIREMENT_AGE` on `as_of`,
/// oldest period first. Records without a usable birth date are dropped
/// before any comparison.
pub fn retiree_records(dataset: &Dataset, as_of: NaiveDate) -> Vec<AgedRecord<'_>> {
    let mut rows: Vec<AgedRecord<'_>> = dataset
        .records()
        .iter()
        .map(|record| AgedRecord {
            record,
            age: age(record.birth_date, as_of),
        })
        .filter(|r| r.age.years().is_some_and(|y| y >= RETIREMENT_AGE))
        .collect();
    sort_chronologically(&mut rows);
    rows
}
