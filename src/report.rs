// src/report.rs

use crate::load::Loaded;
use crate::query::{retiree_records, withdrawal_records, AgedRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// Overview of what was loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub source_name: String,
    pub total_records: usize,
    pub years: Vec<i32>,
    pub withdrawal_records: usize,
    pub retirees: usize,
}

pub fn dataset_info(loaded: &Loaded, as_of: NaiveDate) -> DatasetInfo {
    let ds = &loaded.dataset;
    DatasetInfo {
        source_name: loaded.source_name.clone(),
        total_records: ds.len(),
        years: ds.years(),
        withdrawal_records: ds.records().iter().filter(|r| r.has_withdrawal()).count(),
        retirees: retiree_records(ds, as_of).len(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WithdrawalSummary {
    pub count: usize,
    pub total: f64,
    pub positive_total: f64,
    pub negative_total: f64,
}

impl WithdrawalSummary {
    pub fn from_rows(rows: &[AgedRecord<'_>]) -> Self {
        rows.iter()
            .map(|r| r.record.withdrawals)
            .fold(Self::default(), |mut s, amount| {
                s.count += 1;
                s.total += amount;
                if amount > 0.0 {
                    s.positive_total += amount;
                } else if amount < 0.0 {
                    s.negative_total += amount;
                }
                s
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RetireeSummary {
    pub count: usize,
    pub average_age: Option<f64>,
    pub oldest: Option<i32>,
    /// Holders aged 60 to 65 inclusive.
    pub aged_60_to_65: usize,
}

impl RetireeSummary {
    pub fn from_rows(rows: &[AgedRecord<'_>]) -> Self {
        let ages: Vec<i32> = rows.iter().filter_map(|r| r.age.years()).collect();
        let average_age = if ages.is_empty() {
            None
        } else {
            Some(ages.iter().map(|&a| f64::from(a)).sum::<f64>() / ages.len() as f64)
        };
        Self {
            count: rows.len(),
            average_age,
            oldest: ages.iter().copied().max(),
            aged_60_to_65: ages.iter().filter(|a| (60..=65).contains(*a)).count(),
        }
    }
}

/// Convenience for callers that want the whole withdrawals view at once.
pub fn withdrawal_summary(loaded: &Loaded, as_of: NaiveDate) -> WithdrawalSummary {
    WithdrawalSummary::from_rows(&withdrawal_records(&loaded.dataset, as_of))
}
