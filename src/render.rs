//! Terminal rendering for elite-core types.
//!
//! Extension traits adding colored output via owo_colors.

use chrono::Datelike;
use elite_core::calendar::{DayCell, Month};
use elite_core::chat::{ChatMessage, Role};
use elite_core::ledger::LedgerState;
use elite_core::records::{AppProject, Prospect, ProspectStatus, Reminder, Subscription, short_id};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ChatMessage {
    fn render(&self) -> String {
        match self.role {
            Role::User => format!("  {} {}", "vous>".cyan(), self.content),
            Role::Assistant => format!("  {} {}", "elite>".magenta().bold(), self.content),
        }
    }
}

const WEEKDAY_INITIALS: [&str; 7] = ["L", "M", "M", "J", "V", "S", "D"];

impl Render for DayCell {
    fn render(&self) -> String {
        let day = format!("{:>2}", self.day());
        let day = if self.is_selected {
            day.black().on_bright_magenta().to_string()
        } else if self.is_today {
            day.bright_magenta().underline().to_string()
        } else {
            day
        };

        match self.badge() {
            Some(badge) => format!("{}{:<2}", day, badge.red()),
            None => format!("{}  ", day),
        }
    }
}

/// Lay out day cells under a weekday header, one row per Monday-to-Sunday week.
pub fn render_grid(month: Month, cells: &[DayCell]) -> String {
    let mut lines = vec![format!("  {}", month.bold())];

    let header: Vec<_> = WEEKDAY_INITIALS.iter().map(|d| format!("{:>2}  ", d)).collect();
    lines.push(format!("  {}", header.concat().dimmed()));

    let Some(first) = cells.first() else {
        return lines.join("\n");
    };

    let mut row = "    ".repeat(first.date.weekday().num_days_from_monday() as usize);
    for cell in cells {
        row.push_str(&cell.render());
        if cell.date.weekday().num_days_from_monday() == 6 {
            lines.push(format!("  {}", row.trim_end()));
            row.clear();
        }
    }
    if !row.trim().is_empty() {
        lines.push(format!("  {}", row.trim_end()));
    }

    lines.join("\n")
}

impl Render for Reminder {
    fn render(&self) -> String {
        let with = self
            .with_who
            .as_deref()
            .map(|w| format!(" avec {}", w))
            .unwrap_or_default();
        let duration = self
            .duration
            .map(|m| format!(" ({} min)", m))
            .unwrap_or_default();
        let line = format!("{} {} {}{}{}", self.date, self.time, self.title, with, duration);
        let short = short_id(&self.id);
        let id = short.dimmed();
        if self.done {
            format!("   {} {} {}", "✓".green(), id, line.dimmed())
        } else {
            format!("   {} {} {}", "•".yellow(), id, line)
        }
    }
}

impl Render for LedgerState {
    fn render(&self) -> String {
        let mut lines = vec![
            format!("  {} {} EUR", "Epargne".bold(), self.current_savings),
            format!("  {} {} EUR", "Revenus totaux".green(), self.total_income()),
            format!("  {} {} EUR", "Depenses totales".red(), self.total_expenses()),
        ];

        if !self.incomes.is_empty() {
            lines.push(String::new());
            for income in &self.incomes {
                let source = income
                    .source
                    .as_deref()
                    .map(|s| format!(" ({})", s))
                    .unwrap_or_default();
                lines.push(format!(
                    "   {} {} {} {}{} {}",
                    "+".green(),
                    short_id(&income.id).dimmed(),
                    income.date.dimmed(),
                    income.label,
                    source.dimmed(),
                    format!("{} EUR", income.amount).green()
                ));
            }
        }

        if !self.expenses.is_empty() {
            lines.push(String::new());
            for expense in &self.expenses {
                lines.push(format!(
                    "   {} {} {} {} {} {}",
                    "-".red(),
                    short_id(&expense.id).dimmed(),
                    expense.date.dimmed(),
                    expense.label,
                    format!("[{}]", expense.category).dimmed(),
                    format!("{} EUR", expense.amount).red()
                ));
            }
        }

        lines.join("\n")
    }
}

impl Render for Prospect {
    fn render(&self) -> String {
        let status = match self.status {
            ProspectStatus::Hot => "chaud".red().to_string(),
            ProspectStatus::Cold => "froid".blue().to_string(),
            ProspectStatus::InProgress => "en cours".yellow().to_string(),
        };
        let phone = self
            .phone
            .as_deref()
            .map(|p| format!(" {}", p))
            .unwrap_or_default();
        format!(
            "   {} {} [{}] {}{} {}",
            short_id(&self.id).dimmed(),
            self.name.bold(),
            status,
            self.source.dimmed(),
            phone.dimmed(),
            self.date.dimmed()
        )
    }
}

impl Render for Subscription {
    fn render(&self) -> String {
        let when = match &self.expiration_date {
            Some(expires) if self.is_domain() => format!("Exp: {}", expires),
            _ => format!("Prelevement le {}", self.billing_date),
        };
        let period = if self.is_domain() { "an" } else { "mois" };
        format!(
            "   {} {} {} {} {}",
            short_id(&self.id).dimmed(),
            self.name,
            format!("[{}]", self.category).dimmed(),
            when.dimmed(),
            format!("{} EUR/{}", self.amount, period).bold()
        )
    }
}

impl Render for AppProject {
    fn render(&self) -> String {
        let objective = if self.objective.is_empty() {
            String::new()
        } else {
            format!(" {}", self.objective.dimmed())
        };
        format!(
            "   {} {}{} {}",
            short_id(&self.id).dimmed(),
            self.name.bold(),
            objective,
            format!("~{} EUR", self.estimated_revenue).green()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use elite_core::calendar::build_month_at;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Grid rows for `month` with nothing selected, no today and no events.
    fn plain_rows(month: &str) -> Vec<String> {
        let month = Month::parse(month).unwrap();
        let outside = ymd(1999, 1, 1);
        let cells = build_month_at::<&str>(month, outside, &[], outside);
        render_grid(month, &cells)
            .lines()
            .skip(2)
            .map(String::from)
            .collect()
    }

    #[test]
    fn first_week_is_padded_from_monday() {
        // 2025-02-01 is a Saturday.
        let rows = plain_rows("2025-02");
        assert_eq!(rows[0], format!("  {}{}", " ".repeat(20), " 1   2"));
        assert_eq!(rows[1], "   3   4   5   6   7   8   9");
    }

    #[test]
    fn rows_break_after_sunday_and_flush_the_last_week() {
        let rows = plain_rows("2025-02");
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[3], "  17  18  19  20  21  22  23");
        assert_eq!(rows[4], "  24  25  26  27  28");
    }

    #[test]
    fn month_ending_on_sunday_has_no_trailing_row() {
        // 2025-09-01 is a Monday and 2025-11-30 a Sunday.
        let rows = plain_rows("2025-09");
        assert_eq!(rows[0], "   1   2   3   4   5   6   7");

        let rows = plain_rows("2025-11");
        assert_eq!(rows.last().unwrap(), "  24  25  26  27  28  29  30");
        assert!(rows.iter().all(|r| !r.trim().is_empty()));
    }

    #[test]
    fn empty_cells_render_only_the_header() {
        let month = Month::parse("2025-02").unwrap();
        assert_eq!(render_grid(month, &[]).lines().count(), 2);
    }

    #[test]
    fn busy_day_shows_its_badge() {
        let month = Month::parse("2025-01").unwrap();
        let events = ["2025-01-15"; 12];
        let outside = ymd(1999, 1, 1);
        let cells = build_month_at(month, outside, &events, outside);
        let grid = render_grid(month, &cells);
        assert!(grid.contains("9+"));
        assert_eq!(grid.matches('+').count(), 1);
    }

    #[test]
    fn listings_lead_with_the_short_id() {
        let mut reminder = Reminder::new("Appel", ymd(2025, 1, 15), None);
        reminder.id = "0123456789".into();
        assert!(reminder.render().contains("01234567"));
        assert!(!reminder.render().contains("012345678"));
    }
}
