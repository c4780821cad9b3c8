//! Per-day view model for one displayed month.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::clock::{Clock, SystemClock};
use super::month::{Month, date_key};

/// Anything that lands on a calendar day via a `YYYY-MM-DD` string.
///
/// Only the date string matters for bucketing; a malformed string simply never
/// equals any day's key.
pub trait Dated {
    fn date_key(&self) -> &str;
}

impl Dated for str {
    fn date_key(&self) -> &str {
        self
    }
}

impl Dated for String {
    fn date_key(&self) -> &str {
        self
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date_key(&self) -> &str {
        (**self).date_key()
    }
}

/// Computed view record for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub event_count: usize,
}

impl DayCell {
    /// Day of month, starting at 1.
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn badge(&self) -> Option<String> {
        badge(self.event_count)
    }
}

/// Event-count badge: nothing for zero, "9+" past nine.
pub fn badge(count: usize) -> Option<String> {
    match count {
        0 => None,
        1..=9 => Some(count.to_string()),
        _ => Some("9+".to_string()),
    }
}

/// Count events per date string in one pass.
pub fn count_by_date<E: Dated>(events: &[E]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for event in events {
        *counts.entry(event.date_key()).or_insert(0) += 1;
    }
    counts
}

/// Build the day cells of `month`, judging "today" by the local wall clock at
/// call time.
pub fn build_month<E: Dated>(month: Month, selected: NaiveDate, events: &[E]) -> Vec<DayCell> {
    build_month_at(month, selected, events, SystemClock.today())
}

/// Build the day cells of `month` with an explicit `today`.
///
/// Yields exactly one cell per day of the month, ascending from day 1. At most
/// one cell is selected: the one equal to `selected`, if it falls in `month`.
pub fn build_month_at<E: Dated>(
    month: Month,
    selected: NaiveDate,
    events: &[E],
    today: NaiveDate,
) -> Vec<DayCell> {
    let counts = count_by_date(events);

    month
        .days()
        .map(|date| DayCell {
            date,
            is_today: date == today,
            is_selected: date == selected,
            event_count: counts.get(date_key(date).as_str()).copied().unwrap_or(0),
        })
        .collect()
}
