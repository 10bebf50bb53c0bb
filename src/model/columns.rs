// src/model/columns.rs

pub const IDENTIFIER: &str = "Unit Holder ID";
pub const SSNIT_NUMBER: &str = "Social Security #";
pub const NAME: &str = "Contributor Name";
pub const ADDRESS: &str = "Address";
pub const EMPLOYER_CODE: &str = "Employer Code";
pub const SCHEME_CODE: &str = "Scheme Code";
pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const WITHDRAWALS: &str = "Withdrawals";
pub const BEGIN_BALANCE: &str = "Begin Bal";
pub const END_BALANCE: &str = "End Bal";
pub const CONTRIBUTION: &str = "Contribution";
pub const EMPLOYER_CONTRIBUTION: &str = "App Contribute";
pub const MISC_CONTRIBUTION: &str = "Misc Contri.";

/// Birth-date columns in priority order. Only the first one present is used.
pub const BIRTH_DATE_CANDIDATES: [&str; 4] = ["Date_of_Birth", "combined", "DOB", "Birth_Date"];

/// Positions of the recognized columns within one file's header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub identifier: Option<usize>,
    pub ssnit_number: Option<usize>,
    pub name: Option<usize>,
    pub address: Option<usize>,
    pub employer_code: Option<usize>,
    pub scheme_code: Option<usize>,
    pub birth_date: Option<usize>,
    pub year: Option<usize>,
    pub month: Option<usize>,
    pub withdrawals: Option<usize>,
    pub begin_balance: Option<usize>,
    pub end_balance: Option<usize>,
    pub contribution: Option<usize>,
    pub employer_contribution: Option<usize>,
    pub misc_contribution: Option<usize>,
}

impl ColumnMap {
    /// Resolve recognized columns by exact header name. Duplicate headers
    /// resolve to their first occurrence.
    pub fn from_headers(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            identifier: find(IDENTIFIER),
            ssnit_number: find(SSNIT_NUMBER),
            name: find(NAME),
            address: find(ADDRESS),
            employer_code: find(EMPLOYER_CODE),
            scheme_code: find(SCHEME_CODE),
            birth_date: BIRTH_DATE_CANDIDATES.iter().find_map(|c| find(c)),
            year: find(YEAR),
            month: find(MONTH),
            withdrawals: find(WITHDRAWALS),
            begin_balance: find(BEGIN_BALANCE),
            end_balance: find(END_BALANCE),
            contribution: find(CONTRIBUTION),
            employer_contribution: find(EMPLOYER_CONTRIBUTION),
            misc_contribution: find(MISC_CONTRIBUTION),
        }
    }

    /// Name of the birth-date column in use, if any.
    pub fn birth_date_column<'a>(&self, headers: &'a [String]) -> Option<&'a str> {
        self.birth_date
            .and_then(|i| headers.get(i))
            .map(String::as_str)
    }
}
