use anyhow::Result;
use elite_core::calendar::{Clock, SystemClock};
use elite_core::ledger::LedgerState;
use elite_core::records::{Expense, Income, Subscription, find_record};
use owo_colors::OwoColorize;

use super::Context;
use crate::render::Render;

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        anyhow::bail!("Amount must be a positive number, got {}", amount);
    }
    Ok(())
}

/// Estimated savings as displayed: never below zero.
fn shown_estimate(ledger: &LedgerState, subscriptions: &[Subscription]) -> f64 {
    ledger.estimated_savings(subscriptions).max(0.0)
}

pub fn expense(ctx: &mut Context, label: &str, amount: f64, category: Option<&str>) -> Result<()> {
    if label.trim().is_empty() {
        anyhow::bail!("An expense needs a label");
    }
    check_amount(amount)?;

    let mut ledger = ctx.store.load_ledger();
    let expense = Expense::new(label, amount, category, SystemClock.today());
    println!(
        "{}",
        format!("  - {} {} EUR [{}]", expense.label, expense.amount, expense.category).red()
    );
    ledger.add_expense(expense);
    ctx.store.save_ledger(&ledger);
    Ok(())
}

pub fn remove_expense(ctx: &mut Context, id: &str) -> Result<()> {
    let mut ledger = ctx.store.load_ledger();
    let index = find_record(&ledger.expenses, id)?;
    let expense = ledger.expenses[index].clone();
    ledger.remove_expense(&expense.id);
    ctx.store.save_ledger(&ledger);

    println!("  Removed expense: {} {} EUR", expense.label, expense.amount);
    Ok(())
}

pub fn income(
    ctx: &mut Context,
    label: &str,
    amount: f64,
    source: Option<&str>,
    save: bool,
) -> Result<()> {
    if label.trim().is_empty() {
        anyhow::bail!("An income needs a label");
    }
    check_amount(amount)?;

    let mut ledger = ctx.store.load_ledger();
    let income = Income::new(label, amount, source, SystemClock.today());
    println!(
        "{}",
        format!("  + {} {} EUR", income.label, income.amount).green()
    );
    ledger.add_income(income);
    if save {
        ledger.add_to_savings(amount);
        println!("  Epargne: {} EUR", ledger.current_savings);
    }
    ctx.store.save_ledger(&ledger);
    Ok(())
}

/// Savings are left as they are.
pub fn remove_income(ctx: &mut Context, id: &str) -> Result<()> {
    let mut ledger = ctx.store.load_ledger();
    let index = find_record(&ledger.incomes, id)?;
    let income = ledger.incomes[index].clone();
    ledger.remove_income(&income.id);
    ctx.store.save_ledger(&ledger);

    println!("  Removed income: {} {} EUR", income.label, income.amount);
    Ok(())
}

pub fn show(ctx: &Context, json: bool) -> Result<()> {
    let ledger = ctx.store.load_ledger();
    if json {
        println!("{}", serde_json::to_string_pretty(&ledger)?);
        return Ok(());
    }

    println!("{}", ledger.render());

    let subscriptions = ctx.store.load_subscriptions();
    println!();
    println!(
        "  {} {} EUR",
        "Epargne estimee".bold(),
        shown_estimate(&ledger, &subscriptions)
    );
    Ok(())
}
