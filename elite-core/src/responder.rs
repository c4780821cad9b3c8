//! Scripted replies for the assistant chat widget.
//!
//! The responder is an ordered table of keyword rules. Input is lowercased and
//! the first rule with a trigger contained in it wins; there is no scoring, so
//! an input mentioning both a prospect and a reminder always gets the prospect
//! reply. Inputs matching nothing get the fallback reply.

use std::sync::LazyLock;

/// First message of every chat session.
pub const WELCOME_MESSAGE: &str = "Bonjour ! Je suis votre assistant ELITE. Je peux vous aider a ajouter un prospect, creer un rappel, gerer vos abonnements ou vous resumer votre journee. Que puis-je faire pour vous ?";

pub const FALLBACK_REPLY: &str = "Je comprends votre demande. Cette fonctionnalite sera bientot connectee a une API pour executer vos actions automatiquement. En attendant, utilisez les sections de l'app pour gerer vos donnees.";

const PROSPECT_REPLY: &str = "J'ai note votre demande concernant un prospect. Rendez-vous dans la section Prospects pour l'ajouter, ou donnez-moi le nom et le statut et je m'en occupe ! (Fonctionnalite API a venir)";
const REMINDER_REPLY: &str = "Pour creer un rappel, rendez-vous dans la section Calendrier ou dites-moi le titre, la date et l'heure. (Connexion API a venir)";
const SUBSCRIPTION_REPLY: &str = "Vous pouvez gerer vos abonnements dans la section dediee. Dites-moi le nom et le montant pour en ajouter un ! (API en preparation)";
const DOMAIN_REPLY: &str = "Pour ajouter un domaine, allez dans la section Domaines & Apps. Je pourrai bientot le faire directement pour vous.";
const SUMMARY_REPLY: &str = "Voici votre resume : 2 prospects chauds en attente, 3 rappels actifs, 197 EUR de depenses ce mois, 65 EUR/mois en abonnements. Restez focus !";
const EXPENSE_REPLY: &str = "Pour ajouter une depense, rendez-vous dans la section Finances. Donnez-moi le libelle et le montant pour une saisie rapide ! (API a venir)";
const GREETING_REPLY: &str = "Salut ! Pret a conquerir la journee ? Dites-moi ce dont vous avez besoin.";

static DEFAULT_MATCHER: LazyLock<ResponseMatcher> = LazyLock::new(ResponseMatcher::default);

/// Which topic a rule answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Prospect,
    Reminder,
    Subscription,
    Domain,
    Summary,
    Expense,
    Greeting,
    Custom,
}

/// A set of trigger substrings paired with the reply they produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub kind: RuleKind,
    triggers: Vec<String>,
    reply: String,
}

impl KeywordRule {
    /// Triggers are stored lowercased; empty triggers are dropped since they
    /// would match every input.
    pub fn new(kind: RuleKind, triggers: &[&str], reply: impl Into<String>) -> Self {
        KeywordRule {
            kind,
            triggers: triggers
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            reply: reply.into(),
        }
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    /// `lowered` must already be lowercased.
    fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t.as_str()))
    }
}

/// The stock rule table, highest priority first.
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(RuleKind::Prospect, &["prospect"], PROSPECT_REPLY),
        KeywordRule::new(RuleKind::Reminder, &["rappel", "reminder"], REMINDER_REPLY),
        KeywordRule::new(
            RuleKind::Subscription,
            &["abonnement", "subscription"],
            SUBSCRIPTION_REPLY,
        ),
        KeywordRule::new(RuleKind::Domain, &["domaine", "domain"], DOMAIN_REPLY),
        KeywordRule::new(RuleKind::Summary, &["resume", "journee", "today"], SUMMARY_REPLY),
        KeywordRule::new(RuleKind::Expense, &["depense", "expense"], EXPENSE_REPLY),
        KeywordRule::new(
            RuleKind::Greeting,
            &["bonjour", "salut", "hello", "hey"],
            GREETING_REPLY,
        ),
    ]
}

/// Ordered first-match keyword responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMatcher {
    rules: Vec<KeywordRule>,
    fallback: String,
}

impl Default for ResponseMatcher {
    fn default() -> Self {
        ResponseMatcher::new(default_rules(), FALLBACK_REPLY)
    }
}

impl ResponseMatcher {
    pub fn new(rules: Vec<KeywordRule>, fallback: impl Into<String>) -> Self {
        ResponseMatcher {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Append a rule with the lowest priority.
    pub fn with_rule(mut self, rule: KeywordRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// The rule that answers `input`, or `None` when the fallback applies.
    pub fn classify(&self, input: &str) -> Option<&KeywordRule> {
        let lowered = input.trim().to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }

    pub fn respond(&self, input: &str) -> &str {
        self.classify(input)
            .map(KeywordRule::reply)
            .unwrap_or(&self.fallback)
    }
}

/// Reply to `input` using the stock rule table.
pub fn respond(input: &str) -> &'static str {
    DEFAULT_MATCHER.respond(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prospect_matches_any_case_and_surrounding_text() {
        for input in [
            "prospect",
            "Ajoute un PROSPECT stp",
            "new Prospect: ACME",
            "je veux prospecter demain",
        ] {
            assert_eq!(respond(input), PROSPECT_REPLY, "input: {input}");
        }
    }

    #[test]
    fn synonyms_are_or_within_a_rule() {
        assert_eq!(respond("Cree un rappel"), REMINDER_REPLY);
        assert_eq!(respond("set a reminder"), REMINDER_REPLY);
        assert_eq!(respond("mes abonnements"), SUBSCRIPTION_REPLY);
        assert_eq!(respond("Netflix subscription"), SUBSCRIPTION_REPLY);
        assert_eq!(respond("nouveau domaine"), DOMAIN_REPLY);
        assert_eq!(respond("buy a domain"), DOMAIN_REPLY);
        assert_eq!(respond("fais-moi un resume"), SUMMARY_REPLY);
        assert_eq!(respond("what about today"), SUMMARY_REPLY);
        assert_eq!(respond("une depense"), EXPENSE_REPLY);
        assert_eq!(respond("log an expense"), EXPENSE_REPLY);
        assert_eq!(respond("Salut"), GREETING_REPLY);
        assert_eq!(respond("hey there"), GREETING_REPLY);
    }

    #[test]
    fn unmatched_input_gets_fallback() {
        assert_eq!(respond("quelle heure est-il ?"), FALLBACK_REPLY);
        assert_eq!(respond("42"), FALLBACK_REPLY);
    }

    #[test]
    fn empty_input_is_total() {
        assert_eq!(respond(""), FALLBACK_REPLY);
        assert_eq!(respond("   \n\t"), FALLBACK_REPLY);
    }

    #[test]
    fn first_rule_in_table_wins() {
        assert_eq!(respond("rappel pour le prospect Durand"), PROSPECT_REPLY);
        assert_eq!(respond("reminder about my subscription"), REMINDER_REPLY);
        // "today" (summary) outranks "expense"
        assert_eq!(respond("expense today"), SUMMARY_REPLY);
        // "hey" only matters when nothing above it matched
        assert_eq!(respond("hey, domain renewal?"), DOMAIN_REPLY);
    }

    #[test]
    fn substring_matching_is_not_whole_word() {
        // "theyre" contains "hey"
        assert_eq!(respond("theyre late"), GREETING_REPLY);
    }

    #[test]
    fn classify_reports_the_winning_rule() {
        let matcher = ResponseMatcher::default();
        assert_eq!(
            matcher.classify("Bonjour, un prospect").map(|r| r.kind),
            Some(RuleKind::Prospect)
        );
        assert_eq!(matcher.classify("rien"), None);
    }

    #[test]
    fn custom_rules_and_fallback() {
        let matcher = ResponseMatcher::new(
            vec![KeywordRule::new(RuleKind::Custom, &["Facture", "", "invoice"], "ok facture")],
            "??",
        )
        .with_rule(KeywordRule::new(RuleKind::Greeting, &["hello"], "hi"));

        assert_eq!(matcher.rules()[0].triggers(), ["facture", "invoice"]);
        assert_eq!(matcher.respond("Send the INVOICE, hello"), "ok facture");
        assert_eq!(matcher.respond("hello"), "hi");
        assert_eq!(matcher.respond("nothing here"), "??");
    }
}
