//! Flat dashboard records.
//!
//! Field names serialize in camelCase so the persisted blobs keep the shape the
//! dashboard has always written. Amounts are euros, dates are `YYYY-MM-DD`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{Dated, date_key};
use crate::error::{EliteError, EliteResult};

/// Fresh record identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Category used when none is given.
pub const DEFAULT_CATEGORY: &str = "Autre";

pub const DOMAIN_CATEGORY: &str = "Domaine";
pub const DEFAULT_DOMAIN_AMOUNT: f64 = 12.0;
pub const DEFAULT_DOMAIN_EXPIRATION: &str = "2027-01-01";
const DEFAULT_DOMAIN_BILLING: &str = "01 Jan";
const DEFAULT_BILLING_DAY: &str = "1";

const FRENCH_SHORT_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// Anything addressed by its `id` field.
pub trait Record {
    fn id(&self) -> &str;
}

/// Position of the record whose id is `id`, or else of the only record whose
/// id starts with it.
pub fn find_record<T: Record>(records: &[T], id: &str) -> EliteResult<usize> {
    let id = id.trim();
    if id.is_empty() {
        return Err(EliteError::NotFound(id.to_string()));
    }
    if let Some(index) = records.iter().position(|r| r.id() == id) {
        return Ok(index);
    }

    let mut matches = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.id().starts_with(id));
    match (matches.next(), matches.next()) {
        (Some((index, _)), None) => Ok(index),
        (Some(_), Some(_)) => Err(EliteError::AmbiguousId(id.to_string())),
        (None, _) => Err(EliteError::NotFound(id.to_string())),
    }
}

/// Remove and return the record `find_record` resolves `id` to.
pub fn remove_record<T: Record>(records: &mut Vec<T>, id: &str) -> EliteResult<T> {
    let index = find_record(records, id)?;
    Ok(records.remove(index))
}

/// First eight characters of an id, for listings.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub savings_goal: f64,
    pub current_savings: f64,
    pub goal_name: String,
    pub monthly_goal: f64,
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            name: "Adem".to_string(),
            savings_goal: 250_000.0,
            current_savings: 0.0,
            goal_name: "Hurácan".to_string(),
            monthly_goal: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProspectStatus {
    Hot,
    Cold,
    InProgress,
}

impl fmt::Display for ProspectStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProspectStatus::Hot => write!(f, "hot"),
            ProspectStatus::Cold => write!(f, "cold"),
            ProspectStatus::InProgress => write!(f, "in-progress"),
        }
    }
}

impl FromStr for ProspectStatus {
    type Err = EliteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hot" | "chaud" => Ok(ProspectStatus::Hot),
            "cold" | "froid" => Ok(ProspectStatus::Cold),
            "in-progress" | "en-cours" => Ok(ProspectStatus::InProgress),
            other => Err(EliteError::Serialization(format!(
                "Unknown prospect status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    pub id: String,
    pub name: String,
    pub date: String,
    pub status: ProspectStatus,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Prospect {
    /// A prospect dated `date`; a blank source becomes "Direct".
    pub fn new(name: &str, status: ProspectStatus, source: &str, date: NaiveDate) -> Self {
        let source = source.trim();
        Prospect {
            id: new_id(),
            name: name.trim().to_string(),
            date: date_key(date),
            status,
            source: if source.is_empty() { "Direct" } else { source }.to_string(),
            phone: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_who: Option<String>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Reminder {
    pub const DEFAULT_TIME: &'static str = "09:00";

    pub fn new(title: &str, date: NaiveDate, time: Option<&str>) -> Self {
        Reminder {
            id: new_id(),
            title: title.trim().to_string(),
            description: String::new(),
            date: date_key(date),
            time: time.unwrap_or(Self::DEFAULT_TIME).to_string(),
            done: false,
            with_who: None,
            duration: None,
        }
    }

    pub fn toggle_done(&mut self) {
        self.done = !self.done;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub label: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
}

impl Expense {
    pub fn new(label: &str, amount: f64, category: Option<&str>, date: NaiveDate) -> Self {
        Expense {
            id: new_id(),
            label: label.trim().to_string(),
            amount,
            date: date_key(date),
            category: non_blank(category).unwrap_or(DEFAULT_CATEGORY).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub label: String,
    pub amount: f64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Income {
    pub fn new(label: &str, amount: f64, source: Option<&str>, date: NaiveDate) -> Self {
        Income {
            id: new_id(),
            label: label.trim().to_string(),
            amount,
            date: date_key(date),
            source: non_blank(source).map(String::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionKind {
    Subscription,
    Domain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    Active,
    Expired,
    Renewal,
}

/// A recurring charge: a monthly subscription or a yearly domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub billing_date: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: SubscriptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DomainStatus>,
}

impl Subscription {
    /// A monthly charge; billing day defaults to "1", category to "Autre".
    pub fn monthly(
        name: &str,
        amount: f64,
        billing_date: Option<&str>,
        category: Option<&str>,
    ) -> Self {
        Subscription {
            id: new_id(),
            name: name.trim().to_string(),
            amount,
            billing_date: non_blank(billing_date)
                .unwrap_or(DEFAULT_BILLING_DAY)
                .to_string(),
            category: non_blank(category).unwrap_or(DEFAULT_CATEGORY).to_string(),
            kind: SubscriptionKind::Subscription,
            expiration_date: None,
            status: None,
        }
    }

    /// A yearly domain renewal, active from the start.
    ///
    /// The billing date is the expiration's day and short French month
    /// ("15 janv."), or "01 Jan" when no expiration is known.
    pub fn domain(name: &str, amount: Option<f64>, expiration: Option<NaiveDate>) -> Self {
        let billing_date = match expiration {
            Some(date) => format!(
                "{:02} {}",
                date.day(),
                FRENCH_SHORT_MONTHS[date.month0() as usize]
            ),
            None => DEFAULT_DOMAIN_BILLING.to_string(),
        };
        Subscription {
            id: new_id(),
            name: name.trim().to_string(),
            amount: amount.unwrap_or(DEFAULT_DOMAIN_AMOUNT),
            billing_date,
            category: DOMAIN_CATEGORY.to_string(),
            kind: SubscriptionKind::Domain,
            expiration_date: Some(
                expiration
                    .map(date_key)
                    .unwrap_or_else(|| DEFAULT_DOMAIN_EXPIRATION.to_string()),
            ),
            status: Some(DomainStatus::Active),
        }
    }

    pub fn is_domain(&self) -> bool {
        self.kind == SubscriptionKind::Domain
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppProject {
    pub id: String,
    pub name: String,
    pub objective: String,
    pub estimated_revenue: f64,
}

impl AppProject {
    pub fn new(name: &str, objective: &str, estimated_revenue: Option<f64>) -> Self {
        AppProject {
            id: new_id(),
            name: name.trim().to_string(),
            objective: objective.trim().to_string(),
            estimated_revenue: estimated_revenue.unwrap_or(0.0),
        }
    }
}

macro_rules! impl_record {
    ($($ty:ty),*) => {
        $(impl Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_record!(Prospect, Reminder, Expense, Income, Subscription, AppProject);

impl Dated for Prospect {
    fn date_key(&self) -> &str {
        &self.date
    }
}

impl Dated for Reminder {
    fn date_key(&self) -> &str {
        &self.date
    }
}

impl Dated for Expense {
    fn date_key(&self) -> &str {
        &self.date
    }
}

impl Dated for Income {
    fn date_key(&self) -> &str {
        &self.date
    }
}
