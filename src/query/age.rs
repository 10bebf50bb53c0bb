use chrono::{Datelike, Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// Calendar age, or a marker for records whose birth date is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Age {
    Years(i32),
    NotApplicable,
}

impl Age {
    pub fn years(self) -> Option<i32> {
        match self {
            Age::Years(y) => Some(y),
            Age::NotApplicable => None,
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Years(y) => write!(f, "{}", y),
            Age::NotApplicable => f.write_str(crate::model::NOT_AVAILABLE),
        }
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Age::Years(y) => serializer.serialize_i32(*y),
            Age::NotApplicable => serializer.serialize_str(crate::model::NOT_AVAILABLE),
        }
    }
}

/// Exact calendar age at `as_of`: whole years, minus one when the birthday
/// has not yet come round in `as_of`'s year.
pub fn age(birth_date: Option<NaiveDate>, as_of: NaiveDate) -> Age {
    let Some(born) = birth_date else {
        return Age::NotApplicable;
    };
    let years = as_of.year() - born.year();
    let before_birthday = (as_of.month(), as_of.day()) < (born.month(), born.day());
    Age::Years(if before_birthday { years - 1 } else { years })
}

/// Age as of the local calendar date.
pub fn age_today(birth_date: Option<NaiveDate>) -> Age {
    age(birth_date, today())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
