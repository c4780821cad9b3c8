//! Month-grid calendar: day bucketing, navigation and view state.

mod clock;
mod grid;
mod month;
mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use grid::{Dated, DayCell, badge, build_month, build_month_at, count_by_date};
pub use month::{Month, date_key, parse_date};
pub use view::{CalendarView, ViewMode, visible_cells};
