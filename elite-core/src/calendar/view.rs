//! Calendar widget state: displayed month, selected date, display mode.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::grid::{Dated, DayCell, build_month_at};
use super::month::Month;
use crate::error::EliteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Weekly,
    Monthly,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ViewMode::Weekly => write!(f, "weekly"),
            ViewMode::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = EliteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "hebdo" => Ok(ViewMode::Weekly),
            "monthly" | "month" | "mensuel" => Ok(ViewMode::Monthly),
            other => Err(EliteError::Config(format!("Unknown view mode '{other}'"))),
        }
    }
}

/// The two independent pieces of calendar state plus the display mode.
///
/// Selecting a date never moves the displayed month; callers pair
/// `select_date` with `show_month_of` when they want both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    month: Month,
    selected: NaiveDate,
    mode: ViewMode,
}

impl CalendarView {
    /// Start on the month of `selected`, in weekly mode.
    pub fn new(selected: NaiveDate) -> Self {
        CalendarView {
            month: Month::of(selected),
            selected,
            mode: ViewMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.prev();
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    pub fn show_month(&mut self, month: Month) {
        self.month = month;
    }

    pub fn show_month_of(&mut self, date: NaiveDate) {
        self.month = Month::of(date);
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// All day cells of the displayed month. Recomputed on every call.
    pub fn cells<E: Dated>(&self, events: &[E], clock: &impl Clock) -> Vec<DayCell> {
        build_month_at(self.month, self.selected, events, clock.today())
    }

    /// The cells the current mode renders.
    pub fn visible<E: Dated>(&self, events: &[E], clock: &impl Clock) -> Vec<DayCell> {
        let cells = self.cells(events, clock);
        visible_cells(&cells, self.month, self.selected, self.mode).to_vec()
    }
}

/// Narrow a month's cells to what `mode` shows.
///
/// Monthly shows everything. Weekly shows the Monday-to-Sunday week holding
/// `selected` when it lies in `month`, otherwise the week holding day 1,
/// clipped to the month.
pub fn visible_cells(
    cells: &[DayCell],
    month: Month,
    selected: NaiveDate,
    mode: ViewMode,
) -> &[DayCell] {
    match mode {
        ViewMode::Monthly => cells,
        ViewMode::Weekly => {
            let anchor = if month.contains(selected) {
                selected
            } else {
                month.first_day()
            };
            let start = i64::from(anchor.day0())
                - i64::from(anchor.weekday().num_days_from_monday());
            let len = cells.len() as i64;
            let lo = start.clamp(0, len) as usize;
            let hi = (start + 7).clamp(0, len) as usize;
            &cells[lo..hi]
        }
    }
}
