use anyhow::{Context as _, Result};
use elite_core::calendar::{CalendarView, Clock, Month, SystemClock, ViewMode, parse_date};
use elite_core::records::{Reminder, find_record, remove_record};
use elite_core::summary::reminders_on;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::{Render, render_grid};

pub fn show(
    ctx: &Context,
    month: Option<&str>,
    select: Option<&str>,
    monthly: bool,
    json: bool,
) -> Result<()> {
    let selected = match select {
        Some(s) => parse_date(s)?,
        None => SystemClock.today(),
    };

    let mode = if monthly {
        ViewMode::Monthly
    } else {
        ctx.config.default_view
    };

    let mut view = CalendarView::new(selected).with_mode(mode);
    if let Some(m) = month {
        view.show_month(Month::parse(m)?);
    }

    let reminders = ctx.store.load_reminders();
    let active: Vec<&Reminder> = reminders.iter().filter(|r| !r.done).collect();
    let cells = view.visible(&active, &SystemClock);

    if json {
        println!("{}", serde_json::to_string_pretty(&cells)?);
        return Ok(());
    }

    println!("{}", render_grid(view.month(), &cells));
    println!();

    let due = reminders_on(&reminders, view.selected());
    println!("  {}", format!("Rappels du {}", view.selected()).bold());
    if due.is_empty() {
        println!("   {}", "Aucun rappel".dimmed());
    }
    for reminder in due {
        println!("{}", reminder.render());
    }

    Ok(())
}

pub fn remind(
    ctx: &mut Context,
    title: &str,
    date: &str,
    time: Option<&str>,
    with: Option<String>,
    duration: Option<u32>,
) -> Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("A reminder needs a title");
    }
    let date = parse_date(date)?;
    if let Some(t) = time {
        chrono::NaiveTime::parse_from_str(t, "%H:%M")
            .with_context(|| format!("Invalid time '{}'. Expected HH:MM", t))?;
    }

    let mut reminder = Reminder::new(title, date, time);
    reminder.with_who = with.filter(|w| !w.trim().is_empty());
    reminder.duration = duration;

    let mut reminders = ctx.store.load_reminders();
    reminders.insert(0, reminder.clone());
    ctx.store.save_reminders(&reminders);

    println!("{}", format!("  Planifie: {}", reminder.title).green());
    println!("{}", reminder.render());
    Ok(())
}

/// Active reminders first, then the completed ones.
pub fn list(ctx: &Context) -> Result<()> {
    let reminders = ctx.store.load_reminders();
    let (done, active): (Vec<&Reminder>, Vec<&Reminder>) =
        reminders.iter().partition(|r| r.done);

    println!("  {}", format!("A venir ({})", active.len()).bold());
    for reminder in &active {
        println!("{}", reminder.render());
    }
    if !done.is_empty() {
        println!();
        println!("  {}", format!("Termines ({})", done.len()).dimmed());
        for reminder in &done {
            println!("{}", reminder.render());
        }
    }
    Ok(())
}

/// Flip a reminder between active and done.
pub fn toggle(ctx: &mut Context, id: &str) -> Result<()> {
    let mut reminders = ctx.store.load_reminders();
    let index = find_record(&reminders, id)?;
    reminders[index].toggle_done();
    ctx.store.save_reminders(&reminders);

    println!("{}", reminders[index].render());
    Ok(())
}

pub fn remove(ctx: &mut Context, id: &str) -> Result<()> {
    let mut reminders = ctx.store.load_reminders();
    let removed = remove_record(&mut reminders, id)?;
    ctx.store.save_reminders(&reminders);

    println!("  Removed reminder: {}", removed.title);
    Ok(())
}
