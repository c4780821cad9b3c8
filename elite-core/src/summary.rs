//! Dashboard figures derived from the records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{Month, date_key};
use crate::ledger::LedgerState;
use crate::records::{Prospect, ProspectStatus, Reminder, Subscription, SubscriptionKind, UserProfile};

/// Home page statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub hot_prospects: usize,
    pub total_prospects: usize,
    pub active_reminders: usize,
    pub month_expenses: f64,
    pub monthly_subscriptions: f64,
    pub subscription_count: usize,
}

impl DashboardSummary {
    pub fn compute(
        prospects: &[Prospect],
        reminders: &[Reminder],
        ledger: &LedgerState,
        subscriptions: &[Subscription],
        month: Month,
    ) -> Self {
        DashboardSummary {
            hot_prospects: prospects
                .iter()
                .filter(|p| p.status == ProspectStatus::Hot)
                .count(),
            total_prospects: prospects.len(),
            active_reminders: reminders.iter().filter(|r| !r.done).count(),
            month_expenses: ledger.month_expenses(month),
            monthly_subscriptions: subscriptions.iter().map(|s| s.amount).sum(),
            subscription_count: subscriptions.len(),
        }
    }
}

/// Subscriptions are billed monthly, domains yearly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTotals {
    pub monthly: f64,
    pub yearly: f64,
    pub domains: f64,
    pub grand_total: f64,
}

impl SubscriptionTotals {
    pub fn compute(subscriptions: &[Subscription]) -> Self {
        let sum_of = |kind: SubscriptionKind| -> f64 {
            subscriptions
                .iter()
                .filter(|s| s.kind == kind)
                .map(|s| s.amount)
                .sum()
        };
        let monthly = sum_of(SubscriptionKind::Subscription);
        let yearly = monthly * 12.0;
        let domains = sum_of(SubscriptionKind::Domain);

        SubscriptionTotals {
            monthly,
            yearly,
            domains,
            grand_total: yearly + domains,
        }
    }
}

/// Progress toward the profile's savings goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProgress {
    /// 0..=100
    pub percent: f64,
    pub remaining: f64,
}

pub fn savings_progress(profile: &UserProfile, current_savings: f64) -> SavingsProgress {
    let percent = if profile.savings_goal > 0.0 {
        (current_savings / profile.savings_goal * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    };
    SavingsProgress {
        percent,
        remaining: profile.savings_goal - current_savings,
    }
}

/// Status filter (None = all) then search over name, source and phone.
/// Name and source compare case-insensitively; phone compares as typed.
pub fn filter_prospects<'a>(
    prospects: &'a [Prospect],
    status: Option<ProspectStatus>,
    search: &str,
) -> Vec<&'a Prospect> {
    let needle = search.to_lowercase();
    prospects
        .iter()
        .filter(|p| status.is_none_or(|s| p.status == s))
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.source.to_lowercase().contains(&needle)
                || p.phone.as_deref().is_some_and(|phone| phone.contains(search))
        })
        .collect()
}

/// Reminders still to do on `date`.
pub fn reminders_on(reminders: &[Reminder], date: NaiveDate) -> Vec<&Reminder> {
    let key = date_key(date);
    reminders
        .iter()
        .filter(|r| !r.done && r.date == key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Expense, new_id};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sub(amount: f64, kind: SubscriptionKind) -> Subscription {
        Subscription {
            id: new_id(),
            name: "s".into(),
            amount,
            billing_date: "1".into(),
            category: "Autre".into(),
            kind,
            expiration_date: None,
            status: None,
        }
    }

    fn prospects() -> Vec<Prospect> {
        let mut acme = Prospect::new("ACME Corp", ProspectStatus::Hot, "LinkedIn", ymd(2025, 1, 1));
        acme.phone = Some("0612345678".into());
        vec![
            acme,
            Prospect::new("Durand", ProspectStatus::Cold, "Instagram", ymd(2025, 1, 2)),
            Prospect::new("Martin", ProspectStatus::Hot, "", ymd(2025, 1, 3)),
        ]
    }

    #[test]
    fn dashboard_summary_counts() {
        let mut done = Reminder::new("fait", ymd(2025, 1, 2), None);
        done.done = true;
        let reminders = vec![Reminder::new("a faire", ymd(2025, 1, 2), None), done];

        let mut ledger = LedgerState::default();
        ledger.add_expense(Expense::new("x", 197.0, None, ymd(2025, 1, 10)));
        ledger.add_expense(Expense::new("y", 50.0, None, ymd(2024, 12, 31)));

        let subs = vec![
            sub(50.0, SubscriptionKind::Subscription),
            sub(15.0, SubscriptionKind::Subscription),
        ];

        let summary = DashboardSummary::compute(
            &prospects(),
            &reminders,
            &ledger,
            &subs,
            Month::parse("2025-01").unwrap(),
        );
        assert_eq!(summary.hot_prospects, 2);
        assert_eq!(summary.total_prospects, 3);
        assert_eq!(summary.active_reminders, 1);
        assert_eq!(summary.month_expenses, 197.0);
        assert_eq!(summary.monthly_subscriptions, 65.0);
        assert_eq!(summary.subscription_count, 2);
    }

    #[test]
    fn subscription_totals_split_monthly_and_domains() {
        let subs = vec![
            sub(10.0, SubscriptionKind::Subscription),
            sub(5.0, SubscriptionKind::Subscription),
            sub(12.0, SubscriptionKind::Domain),
        ];
        let totals = SubscriptionTotals::compute(&subs);
        assert_eq!(totals.monthly, 15.0);
        assert_eq!(totals.yearly, 180.0);
        assert_eq!(totals.domains, 12.0);
        assert_eq!(totals.grand_total, 192.0);
    }

    #[test]
    fn prospect_filter_and_search() {
        let all = prospects();
        assert_eq!(filter_prospects(&all, None, "").len(), 3);
        assert_eq!(filter_prospects(&all, Some(ProspectStatus::Hot), "").len(), 2);

        let by_source: Vec<_> = filter_prospects(&all, None, "insta")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(by_source, vec!["Durand"]);

        assert_eq!(filter_prospects(&all, None, "0612").len(), 1);
        assert_eq!(filter_prospects(&all, Some(ProspectStatus::Cold), "acme").len(), 0);
        // blank source became "Direct"
        assert_eq!(filter_prospects(&all, None, "direct").len(), 1);
    }

    #[test]
    fn savings_progress_caps_at_one_hundred() {
        let profile = UserProfile::default();
        let halfway = savings_progress(&profile, 125_000.0);
        assert_eq!(halfway.percent, 50.0);
        assert_eq!(halfway.remaining, 125_000.0);
        assert_eq!(savings_progress(&profile, 300_000.0).percent, 100.0);
    }

    #[test]
    fn reminders_on_skips_done_and_other_days() {
        let mut done = Reminder::new("fait", ymd(2025, 1, 2), None);
        done.done = true;
        let reminders = vec![
            Reminder::new("oui", ymd(2025, 1, 2), Some("14:00")),
            Reminder::new("autre jour", ymd(2025, 1, 3), None),
            done,
        ];
        let today: Vec<_> = reminders_on(&reminders, ymd(2025, 1, 2))
            .into_iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(today, vec!["oui"]);
    }
}
