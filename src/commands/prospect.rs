use anyhow::Result;
use elite_core::calendar::{Clock, SystemClock};
use elite_core::records::{Prospect, ProspectStatus, remove_record};
use elite_core::summary::filter_prospects;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::Render;

pub fn add(
    ctx: &mut Context,
    name: &str,
    status: Option<&str>,
    source: Option<&str>,
    phone: Option<&str>,
) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("A prospect needs a name");
    }
    let status = match status {
        Some(s) => s.parse()?,
        None => ProspectStatus::Hot,
    };

    let mut prospect = Prospect::new(name, status, source.unwrap_or(""), SystemClock.today());
    prospect.phone = phone
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from);

    let mut prospects = ctx.store.load_prospects();
    prospects.insert(0, prospect.clone());
    ctx.store.save_prospects(&prospects);

    println!("{}", format!("  Ajoute: {}", prospect.name).green());
    println!("{}", prospect.render());
    Ok(())
}

pub fn remove(ctx: &mut Context, id: &str) -> Result<()> {
    let mut prospects = ctx.store.load_prospects();
    let removed = remove_record(&mut prospects, id)?;
    ctx.store.save_prospects(&prospects);

    println!("  Removed prospect: {}", removed.name);
    Ok(())
}

pub fn list(ctx: &Context, status: Option<&str>, search: Option<&str>) -> Result<()> {
    let status = status.map(str::parse::<ProspectStatus>).transpose()?;
    let prospects = ctx.store.load_prospects();
    let shown = filter_prospects(&prospects, status, search.unwrap_or(""));

    let count = |s: ProspectStatus| prospects.iter().filter(|p| p.status == s).count();
    println!(
        "  {} {}  {} {}  {} {}",
        count(ProspectStatus::Hot),
        "chauds".red(),
        count(ProspectStatus::Cold),
        "froids".blue(),
        count(ProspectStatus::InProgress),
        "en cours".yellow()
    );
    println!();

    if shown.is_empty() {
        println!("   {}", "Aucun prospect".dimmed());
    }
    for prospect in shown {
        println!("{}", prospect.render());
    }
    Ok(())
}
