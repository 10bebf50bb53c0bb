use super::{age, identifier_contains, AgedRecord};
use crate::model::{sort_chronologically, Dataset};
use chrono::NaiveDate;
use serde::Serialize;

/// Which side of zero to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SignFilter {
    #[default]
    All,
    /// Disbursements, strictly `> 0`.
    PositiveOnly,
    /// Adjustments, strictly `< 0`.
    NegativeOnly,
}

impl SignFilter {
    pub fn keeps(self, amount: f64) -> bool {
        match self {
            SignFilter::All => amount != 0.0,
            SignFilter::PositiveOnly => amount > 0.0,
            SignFilter::NegativeOnly => amount < 0.0,
        }
    }
}

/// Narrowing applied on top of `withdrawal_records`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithdrawalFilter {
    pub identifier: Option<String>,
    /// Keep rows whose absolute amount is at least this.
    pub min_amount: Option<f64>,
    pub sign: SignFilter,
}

impl WithdrawalFilter {
    pub fn matches(&self, row: &AgedRecord<'_>) -> bool {
        let amount = row.record.withdrawals;
        self.identifier
            .as_deref()
            .map_or(true, |needle| identifier_contains(row.record, needle))
            && self.min_amount.map_or(true, |min| amount.abs() >= min)
            && self.sign.keeps(amount)
    }

    pub fn apply<'a>(&self, rows: &[AgedRecord<'a>]) -> Vec<AgedRecord<'a>> {
        rows.iter().filter(|r| self.matches(r)).copied().collect()
    }
}

/// Every record with a non-zero withdrawal, oldest first, each with its age
/// as of `as_of`.
pub fn withdrawal_records(dataset: &Dataset, as_of: NaiveDate) -> Vec<AgedRecord<'_>> {
    let mut rows: Vec<AgedRecord<'_>> = dataset
        .records()
        .iter()
        .filter(|r| r.has_withdrawal())
        .map(|record| AgedRecord {
            record,
            age: age(record.birth_date, as_of),
        })
        .collect();
    sort_chronologically(&mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::normalize::{normalize, RawTable};
    use crate::query::Age;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn dataset() -> Dataset {
        let rows = [
            ["U100", "2021", "Feb", "120.5", "1950-03-01"],
            ["U200", "2020", "Jan", "-50", ""],
            ["U300", "2020", "Mar", "0", "1940-01-01"],
            ["U400", "2022", "Apr", "", "1970-01-01"],
            ["u150", "2019", "Dec", "abc", "1960-01-01"],
            ["U500", "2023", "Jun", "10", "1985-07-01"],
        ];
        normalize(RawTable {
            headers: ["Unit Holder ID", "Year", "Month", "Withdrawals", "DOB"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        })
    }

    #[test]
    fn only_nonzero_rows_in_order() {
        let ds = dataset();
        let rows = withdrawal_records(&ds, as_of());
        let ids: Vec<_> = rows.iter().map(|r| r.record.identifier_str()).collect();
        assert_eq!(ids, vec!["U200", "U100", "U500"]);
        assert!(rows.iter().all(|r| r.record.withdrawals != 0.0));

        let excluded = ds
            .records()
            .iter()
            .filter(|r| !rows.iter().any(|w| std::ptr::eq(w.record, *r)));
        for r in excluded {
            assert_eq!(r.withdrawals, 0.0);
        }
    }

    #[test]
    fn ages_are_attached() {
        let ds = dataset();
        let rows = withdrawal_records(&ds, as_of());
        assert_eq!(rows[0].age, Age::NotApplicable);
        assert_eq!(rows[1].age, Age::Years(74));
        assert_eq!(rows[2].age, Age::Years(38));
    }

    #[test]
    fn sign_filter_classifies_negative_adjustments() {
        let ds = dataset();
        let rows = withdrawal_records(&ds, as_of());

        let negative = WithdrawalFilter {
            sign: SignFilter::NegativeOnly,
            ..Default::default()
        }
        .apply(&rows);
        assert_eq!(negative.len(), 1);
        assert_eq!(negative[0].record.withdrawals, -50.0);

        let positive = WithdrawalFilter {
            sign: SignFilter::PositiveOnly,
            ..Default::default()
        }
        .apply(&rows);
        assert!(positive.iter().all(|r| r.record.withdrawals > 0.0));
        assert_eq!(positive.len(), 2);
    }

    #[test]
    fn min_amount_uses_absolute_value() {
        let ds = dataset();
        let rows = withdrawal_records(&ds, as_of());
        let filter = WithdrawalFilter {
            min_amount: Some(50.0),
            ..Default::default()
        };
        let kept: Vec<_> = filter.apply(&rows).iter().map(|r| r.record.withdrawals).collect();
        assert_eq!(kept, vec![-50.0, 120.5]);
    }

    #[test]
    fn identifier_search_is_case_insensitive() {
        let ds = dataset();
        let rows = withdrawal_records(&ds, as_of());
        let filter = WithdrawalFilter {
            identifier: Some("u1".into()),
            ..Default::default()
        };
        let kept = filter.apply(&rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].record.identifier_str(), "U100");
    }

    #[test]
    fn empty_dataset_is_empty() {
        assert!(withdrawal_records(&Dataset::empty(), as_of()).is_empty());
    }
}
