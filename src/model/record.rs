// src/model/record.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Display;

/// Placeholder shown wherever a value is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// One contribution row. Recognized columns are lifted into typed optional
/// fields; `raw` keeps every source field verbatim, aligned to the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub identifier: Option<String>,
    pub ssnit_number: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub employer_code: Option<String>,
    pub scheme_code: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub year: Option<i32>,
    /// Month exactly as written in the file.
    pub month_label: Option<String>,
    /// 1–12, derived from `month_label`. Sorting only.
    #[serde(skip)]
    pub month_rank: Option<u32>,
    pub withdrawals: f64,
    pub begin_balance: Option<f64>,
    pub end_balance: Option<f64>,
    pub contribution: Option<f64>,
    pub employer_contribution: Option<f64>,
    pub misc_contribution: Option<f64>,
    #[serde(skip)]
    pub raw: Vec<String>,
}

impl Record {
    /// A record with no recognized values and the given verbatim fields.
    pub fn from_raw(raw: Vec<String>) -> Self {
        Self {
            identifier: None,
            ssnit_number: None,
            name: None,
            address: None,
            employer_code: None,
            scheme_code: None,
            birth_date: None,
            year: None,
            month_label: None,
            month_rank: None,
            withdrawals: 0.0,
            begin_balance: None,
            end_balance: None,
            contribution: None,
            employer_contribution: None,
            misc_contribution: None,
            raw,
        }
    }

    pub fn has_withdrawal(&self) -> bool {
        self.withdrawals != 0.0
    }

    /// Identifier trimmed, or `""` when absent.
    pub fn identifier_str(&self) -> &str {
        self.identifier.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Orders absent values after present ones, regardless of direction.
fn cmp_absent_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ascending by year, then month rank; absent keys sort last.
pub fn chronological(a: &Record, b: &Record) -> Ordering {
    cmp_absent_last(&a.year, &b.year).then_with(|| cmp_absent_last(&a.month_rank, &b.month_rank))
}

/// Stable in-place chronological sort.
pub fn sort_chronologically<R: AsRef<Record>>(rows: &mut [R]) {
    rows.sort_by(|a, b| chronological(a.as_ref(), b.as_ref()));
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

/// Renders an optional value, falling back to `N/A`.
pub fn display_or_na<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: Option<i32>, rank: Option<u32>, tag: &str) -> Record {
        let mut r = Record::from_raw(vec![tag.to_string()]);
        r.year = year;
        r.month_rank = rank;
        r
    }

    #[test]
    fn absent_periods_sort_last() {
        let mut rows = vec![
            rec(None, Some(1), "no-year"),
            rec(Some(2022), None, "2022-none"),
            rec(Some(2022), Some(3), "2022-mar"),
            rec(Some(2021), Some(12), "2021-dec"),
        ];
        sort_chronologically(&mut rows);
        let order: Vec<&str> = rows.iter().map(|r| r.raw[0].as_str()).collect();
        assert_eq!(order, vec!["2021-dec", "2022-mar", "2022-none", "no-year"]);
    }

    #[test]
    fn equal_periods_keep_file_order() {
        let mut rows = vec![
            rec(Some(2020), Some(5), "first"),
            rec(Some(2020), Some(5), "second"),
        ];
        sort_chronologically(&mut rows);
        assert_eq!(rows[0].raw[0], "first");
        assert_eq!(rows[1].raw[0], "second");
    }

    #[test]
    fn display_or_na_falls_back() {
        assert_eq!(display_or_na::<i32>(None), "N/A");
        assert_eq!(display_or_na(Some(2021)), "2021");
    }
}
