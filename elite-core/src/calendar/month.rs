//! Calendar month arithmetic.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EliteError, EliteResult};

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month(NaiveDate);

impl Month {
    pub fn new(year: i32, month: u32) -> EliteResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Month)
            .ok_or_else(|| EliteError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        // Day 1 exists in every month chrono can represent.
        Month(date - chrono::Duration::days(i64::from(date.day0())))
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> EliteResult<Self> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| EliteError::InvalidMonth(s.to_string()))?;
        Ok(Month(first))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0 + chrono::Duration::days(i64::from(self.days_in_month()) - 1)
    }

    /// The highest day number chrono accepts for this month.
    pub fn days_in_month(&self) -> u32 {
        (29..=31)
            .take_while(|&d| self.0.with_day(d).is_some())
            .last()
            .unwrap_or(28)
    }

    /// Every day of the month, ascending from day 1.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let first = self.0;
        (1..=self.days_in_month()).filter_map(move |d| first.with_day(d))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Month::of(date) == *self
    }

    /// The following month. December rolls into January of the next year.
    /// Saturates at the last month chrono can represent.
    pub fn next(&self) -> Self {
        Month(self.0.checked_add_months(Months::new(1)).unwrap_or(self.0))
    }

    /// The preceding month. January rolls back into December of the previous
    /// year. Saturates at the first month chrono can represent.
    pub fn prev(&self) -> Self {
        Month(self.0.checked_sub_months(Months::new(1)).unwrap_or(self.0))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = EliteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = EliteError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Month::parse(&s)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// Parse a canonical `YYYY-MM-DD` date string.
pub fn parse_date(s: &str) -> EliteResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| EliteError::InvalidDate(s.to_string()))
}

/// Format a date as the canonical `YYYY-MM-DD` key used for event matching.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
