use anyhow::Result;
use elite_core::calendar::{Clock, Month, SystemClock};
use elite_core::records::UserProfile;
use elite_core::summary::{DashboardSummary, savings_progress};
use owo_colors::OwoColorize;

use super::Context;

pub fn connect(ctx: &mut Context, secret: &str) -> Result<()> {
    let gate = ctx.config.auth_gate();

    ctx.state.connect(&gate, secret, &mut ctx.store)?;

    let profile = UserProfile::default();
    println!("{}", format!("  Salut {}, tu es le meilleur !", profile.name).green());
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    ctx.state.logout(&mut ctx.store);
    println!("  Disconnected");
    Ok(())
}

pub fn status(ctx: &Context) -> Result<()> {
    let profile = UserProfile::default();
    let ledger = ctx.store.load_ledger();
    let summary = DashboardSummary::compute(
        &ctx.store.load_prospects(),
        &ctx.store.load_reminders(),
        &ledger,
        &ctx.store.load_subscriptions(),
        Month::of(SystemClock.today()),
    );
    let progress = savings_progress(&profile, ledger.current_savings);

    println!("{}", format!("  {} · {}", profile.name, ctx.state.section()).bold());
    println!();
    println!(
        "  Prospects chauds   {} {}",
        summary.hot_prospects,
        format!("sur {} au total", summary.total_prospects).dimmed()
    );
    println!(
        "  Rappels actifs     {} {}",
        summary.active_reminders,
        "en attente".dimmed()
    );
    println!("  Depenses du mois   {} EUR", summary.month_expenses);
    println!(
        "  Abonnements        {} EUR/mois {}",
        summary.monthly_subscriptions,
        format!("{} actifs", summary.subscription_count).dimmed()
    );
    println!();
    println!(
        "  {} EUR / {} EUR  {}",
        ledger.current_savings,
        profile.savings_goal,
        format!("Objectif : {} ({:.1} %)", profile.goal_name, progress.percent).dimmed()
    );
    println!(
        "  Plus que {} EUR pour ta {} !",
        progress.remaining.bold(),
        profile.goal_name
    );

    Ok(())
}
