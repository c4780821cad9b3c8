//! Savings, expenses and incomes.

use serde::{Deserialize, Serialize};

use crate::calendar::Month;
use crate::records::{Expense, Income, Subscription, SubscriptionKind, UserProfile};

/// The persisted ledger blob: `{currentSavings, expenses, incomes}`.
///
/// Fields missing from a stored blob take their default individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerState {
    pub current_savings: f64,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
}

impl Default for LedgerState {
    fn default() -> Self {
        LedgerState::for_profile(&UserProfile::default())
    }
}

impl LedgerState {
    /// Empty ledger starting from the profile's savings.
    pub fn for_profile(profile: &UserProfile) -> Self {
        LedgerState {
            current_savings: profile.current_savings,
            expenses: Vec::new(),
            incomes: Vec::new(),
        }
    }

    /// Newest first.
    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.insert(0, expense);
    }

    /// Returns whether anything was removed.
    pub fn remove_expense(&mut self, id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        self.expenses.len() != before
    }

    /// Newest first.
    pub fn add_income(&mut self, income: Income) {
        self.incomes.insert(0, income);
    }

    pub fn remove_income(&mut self, id: &str) -> bool {
        let before = self.incomes.len();
        self.incomes.retain(|i| i.id != id);
        self.incomes.len() != before
    }

    /// Savings never drop below zero.
    pub fn add_to_savings(&mut self, amount: f64) {
        self.current_savings = (self.current_savings + amount).max(0.0);
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    pub fn total_income(&self) -> f64 {
        self.incomes.iter().map(|i| i.amount).sum()
    }

    /// Sum of expenses dated within `month`.
    pub fn month_expenses(&self, month: Month) -> f64 {
        let prefix = month.to_string();
        self.expenses
            .iter()
            .filter(|e| e.date.starts_with(&prefix))
            .map(|e| e.amount)
            .sum()
    }

    /// Income minus expenses minus the monthly subscription bill.
    pub fn estimated_savings(&self, subscriptions: &[Subscription]) -> f64 {
        let monthly_subs: f64 = subscriptions
            .iter()
            .filter(|s| s.kind == SubscriptionKind::Subscription)
            .map(|s| s.amount)
            .sum();
        self.total_income() - self.total_expenses() - monthly_subs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subscription(amount: f64, kind: SubscriptionKind) -> Subscription {
        Subscription {
            id: crate::records::new_id(),
            name: "x".into(),
            amount,
            billing_date: "1".into(),
            category: "Autre".into(),
            kind,
            expiration_date: None,
            status: None,
        }
    }

    #[test]
    fn additions_are_newest_first_and_removable() {
        let mut ledger = LedgerState::default();
        let first = Expense::new("Loyer", 800.0, None, ymd(2025, 1, 1));
        let second = Expense::new("Cafe", 4.0, None, ymd(2025, 1, 2));
        let first_id = first.id.clone();
        ledger.add_expense(first);
        ledger.add_expense(second);
        assert_eq!(ledger.expenses[0].label, "Cafe");

        assert!(ledger.remove_expense(&first_id));
        assert!(!ledger.remove_expense(&first_id));
        assert_eq!(ledger.expenses.len(), 1);

        let income = Income::new("Mission", 1500.0, None, ymd(2025, 1, 3));
        let income_id = income.id.clone();
        ledger.add_income(income);
        assert!(ledger.remove_income(&income_id));
        assert!(ledger.incomes.is_empty());
    }

    #[test]
    fn savings_clamp_at_zero() {
        let mut ledger = LedgerState::default();
        ledger.add_to_savings(100.0);
        ledger.add_to_savings(-30.0);
        assert_eq!(ledger.current_savings, 70.0);
        ledger.add_to_savings(-500.0);
        assert_eq!(ledger.current_savings, 0.0);
    }

    #[test]
    fn totals_and_month_filter() {
        let mut ledger = LedgerState::default();
        ledger.add_expense(Expense::new("a", 100.0, None, ymd(2025, 1, 5)));
        ledger.add_expense(Expense::new("b", 50.0, None, ymd(2025, 1, 31)));
        ledger.add_expense(Expense::new("c", 25.0, None, ymd(2025, 2, 1)));
        ledger.add_income(Income::new("d", 1000.0, None, ymd(2025, 1, 1)));

        assert_eq!(ledger.total_expenses(), 175.0);
        assert_eq!(ledger.total_income(), 1000.0);
        assert_eq!(ledger.month_expenses(Month::parse("2025-01").unwrap()), 150.0);
        assert_eq!(ledger.month_expenses(Month::parse("2024-01").unwrap()), 0.0);

        let subs = [
            subscription(15.0, SubscriptionKind::Subscription),
            subscription(12.0, SubscriptionKind::Domain),
        ];
        assert_eq!(ledger.estimated_savings(&subs), 1000.0 - 175.0 - 15.0);
    }

    #[test]
    fn blob_fields_default_individually() {
        let ledger: LedgerState = serde_json::from_str(r#"{"currentSavings": 42}"#).unwrap();
        assert_eq!(ledger.current_savings, 42.0);
        assert!(ledger.expenses.is_empty());

        let ledger: LedgerState = serde_json::from_str("{}").unwrap();
        assert_eq!(ledger, LedgerState::default());
    }

    #[test]
    fn blob_uses_camel_case_keys() {
        let value = serde_json::to_value(LedgerState::default()).unwrap();
        assert!(value.get("currentSavings").is_some());
        assert!(value.get("expenses").is_some());
        assert!(value.get("incomes").is_some());
    }
}
