use crate::load::{date_parser, month, utils};
use crate::model::{ColumnMap, Dataset, Record};
use tracing::debug;

/// A CSV file as read: header names and verbatim string rows.
#[derive(Debug, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Turn a raw table into a sorted `Dataset`. Never fails: every field that
/// cannot be read is absent (or zero, for withdrawals).
pub fn normalize(table: RawTable) -> Dataset {
    let RawTable { headers, rows } = table;
    let columns = ColumnMap::from_headers(&headers);
    let width = headers.len();
    debug!(
        columns = width,
        birth_date = columns.birth_date_column(&headers).unwrap_or("none"),
        "normalizing rows"
    );

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(idx, mut row)| {
            if row.len() != width {
                debug!(row = idx, fields = row.len(), width, "ragged row resized to header width");
                row.resize(width, String::new());
            }
            normalize_row(&columns, row)
        })
        .collect();

    Dataset::new(headers, records)
}

fn normalize_row(columns: &ColumnMap, raw: Vec<String>) -> Record {
    let field = |idx: Option<usize>| idx.and_then(|i| raw.get(i)).map(String::as_str);
    let text = |idx: Option<usize>| field(idx).and_then(utils::clean_opt);
    let number = |idx: Option<usize>| field(idx).and_then(utils::parse_number);

    let month_label = field(columns.month).and_then(|m| {
        if m.trim().is_empty() {
            None
        } else {
            Some(m.to_string())
        }
    });

    Record {
        identifier: text(columns.identifier),
        ssnit_number: text(columns.ssnit_number),
        name: text(columns.name),
        address: text(columns.address),
        employer_code: text(columns.employer_code),
        scheme_code: text(columns.scheme_code),
        birth_date: field(columns.birth_date).and_then(date_parser::parse_birth_date),
        year: field(columns.year).and_then(utils::parse_year),
        month_rank: month_label.as_deref().and_then(month::month_rank),
        month_label,
        withdrawals: field(columns.withdrawals)
            .map(utils::parse_withdrawal)
            .unwrap_or(0.0),
        begin_balance: number(columns.begin_balance),
        end_balance: number(columns.end_balance),
        contribution: number(columns.contribution),
        employer_contribution: number(columns.employer_contribution),
        misc_contribution: number(columns.misc_contribution),
        raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn recognized_fields_are_typed() {
        let ds = normalize(table(
            &["Unit Holder ID", "Year", "Month", "Withdrawals", "DOB", "End Bal", "Extra"],
            &[&[" 123 ", "2021", " Jan", "oops", "1950-02-03", "1,200", "x"]],
        ));
        let r = &ds.records()[0];
        assert_eq!(r.identifier.as_deref(), Some("123"));
        assert_eq!(r.year, Some(2021));
        assert_eq!(r.month_label.as_deref(), Some(" Jan"));
        assert_eq!(r.month_rank, Some(1));
        assert_eq!(r.withdrawals, 0.0);
        assert_eq!(r.birth_date, NaiveDate::from_ymd_opt(1950, 2, 3));
        assert_eq!(r.end_balance, None);
        assert_eq!(r.raw[6], "x");
    }

    #[test]
    fn only_first_birth_date_column_counts() {
        let ds = normalize(table(
            &["Birth_Date", "Date_of_Birth"],
            &[&["1950-02-03", "garbage"]],
        ));
        assert_eq!(ds.records()[0].birth_date, None);
    }

    #[test]
    fn missing_columns_and_ragged_rows() {
        let ds = normalize(table(
            &["Contributor Name", "Year", "Month"],
            &[&["Ama"], &["Kofi", "2020", "Feb", "spill"]],
        ));
        assert_eq!(ds.len(), 2);
        for r in ds.records() {
            assert_eq!(r.raw.len(), 3);
            assert_eq!(r.withdrawals, 0.0);
            assert_eq!(r.identifier, None);
        }
        // dated row first, undated row last
        assert_eq!(ds.records()[0].name.as_deref(), Some("Kofi"));
        assert_eq!(ds.records()[1].year, None);
    }
}
