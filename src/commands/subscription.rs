use anyhow::Result;
use elite_core::calendar::parse_date;
use elite_core::records::{AppProject, Subscription, remove_record};
use elite_core::summary::SubscriptionTotals;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::Render;

pub fn add(
    ctx: &mut Context,
    name: &str,
    amount: f64,
    billing: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("A subscription needs a name");
    }
    if !amount.is_finite() || amount <= 0.0 {
        anyhow::bail!("Amount must be a positive number, got {}", amount);
    }

    let sub = Subscription::monthly(name, amount, billing, category);
    save_new(ctx, sub)
}

pub fn add_domain(
    ctx: &mut Context,
    name: &str,
    amount: Option<f64>,
    expires: Option<&str>,
) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("A domain needs a name");
    }
    let expires = expires.map(parse_date).transpose()?;

    let domain = Subscription::domain(name, amount, expires);
    save_new(ctx, domain)
}

/// Subscriptions keep insertion order.
fn save_new(ctx: &mut Context, sub: Subscription) -> Result<()> {
    let mut subscriptions = ctx.store.load_subscriptions();
    subscriptions.push(sub.clone());
    ctx.store.save_subscriptions(&subscriptions);

    println!("{}", format!("  Ajoute: {}", sub.name).green());
    println!("{}", sub.render());
    Ok(())
}

pub fn add_app(
    ctx: &mut Context,
    name: &str,
    objective: Option<&str>,
    revenue: Option<f64>,
) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("An app needs a name");
    }

    let app = AppProject::new(name, objective.unwrap_or(""), revenue);
    let mut apps = ctx.store.load_apps();
    apps.insert(0, app.clone());
    ctx.store.save_apps(&apps);

    println!("{}", format!("  Ajoute: {}", app.name).green());
    println!("{}", app.render());
    Ok(())
}

/// Removes a subscription or a domain.
pub fn remove(ctx: &mut Context, id: &str) -> Result<()> {
    let mut subscriptions = ctx.store.load_subscriptions();
    let removed = remove_record(&mut subscriptions, id)?;
    ctx.store.save_subscriptions(&subscriptions);

    println!("  Removed: {}", removed.name);
    Ok(())
}

pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let subscriptions = ctx.store.load_subscriptions();
    let apps = ctx.store.load_apps();
    let totals = SubscriptionTotals::compute(&subscriptions);

    if json {
        let value = serde_json::json!({
            "subscriptions": subscriptions,
            "apps": apps,
            "totals": totals,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("  {} {} EUR", "Mensuel".bold(), totals.monthly);
    println!("  {} {} EUR", "Annuel".bold(), totals.yearly);
    println!("  {} {} EUR", "Domaines".bold(), totals.domains);
    println!("  {} {} EUR", "Total annuel".bold(), totals.grand_total);

    let (domains, monthly): (Vec<&Subscription>, Vec<&Subscription>) =
        subscriptions.iter().partition(|s| s.is_domain());
    for (title, group) in [("Abonnements", monthly), ("Domaines", domains)] {
        println!();
        println!("  {}", title.bold());
        if group.is_empty() {
            println!("   {}", "Aucun".dimmed());
        }
        for sub in group {
            println!("{}", sub.render());
        }
    }

    if !apps.is_empty() {
        println!();
        println!("  {}", "Apps".bold());
        for app in &apps {
            println!("{}", app.render());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use elite_core::records::{DEFAULT_DOMAIN_AMOUNT, short_id};

    #[test]
    fn subscriptions_and_domains_feed_the_totals() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());

        add(&mut ctx, "Netflix", 15.0, None, Some("Streaming")).unwrap();
        add(&mut ctx, "Gym", 35.0, Some("5"), None).unwrap();
        add_domain(&mut ctx, "elite.fr", None, Some("2026-02-03")).unwrap();

        let subscriptions = ctx.store.load_subscriptions();
        assert_eq!(subscriptions.len(), 3);
        assert_eq!(subscriptions[0].name, "Netflix");
        assert_eq!(subscriptions[2].billing_date, "03 févr.");

        let totals = SubscriptionTotals::compute(&subscriptions);
        assert_eq!(totals.monthly, 50.0);
        assert_eq!(totals.yearly, 600.0);
        assert_eq!(totals.domains, DEFAULT_DOMAIN_AMOUNT);
        assert_eq!(totals.grand_total, 612.0);
        assert!(list(&ctx, false).is_ok());
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        assert!(add(&mut ctx, "Netflix", -1.0, None, None).is_err());
        assert!(add(&mut ctx, " ", 10.0, None, None).is_err());
        assert!(add_domain(&mut ctx, "elite.fr", None, Some("03/02/2026")).is_err());
        assert!(add_app(&mut ctx, "", None, None).is_err());
        assert!(ctx.store.load_subscriptions().is_empty());
        assert!(ctx.store.load_apps().is_empty());
    }

    #[test]
    fn remove_by_short_id_and_apps_prepend() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        add(&mut ctx, "Netflix", 15.0, None, None).unwrap();
        add_app(&mut ctx, "Coach IA", Some("Lancer"), Some(500.0)).unwrap();
        add_app(&mut ctx, "Boutique", None, None).unwrap();

        let id = ctx.store.load_subscriptions()[0].id.clone();
        remove(&mut ctx, short_id(&id)).unwrap();
        assert!(ctx.store.load_subscriptions().is_empty());

        let apps = ctx.store.load_apps();
        assert_eq!(apps[0].name, "Boutique");
        assert_eq!(apps[1].estimated_revenue, 500.0);
    }
}
