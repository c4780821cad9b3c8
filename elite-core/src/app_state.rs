//! Application-level state: the active section and the connection gate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EliteError, EliteResult};
use crate::store::{AppStore, KeyValueStore};

pub const DEFAULT_SHARED_SECRET: &str = "banizette";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    Prospects,
    Calendar,
    Finances,
    Subscriptions,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Prospects,
        Section::Calendar,
        Section::Finances,
        Section::Subscriptions,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Prospects => "prospects",
            Section::Calendar => "calendar",
            Section::Finances => "finances",
            Section::Subscriptions => "subscriptions",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Section {
    type Err = EliteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.id() == wanted)
            .ok_or_else(|| EliteError::Config(format!("Unknown section '{s}'")))
    }
}

/// Shared-secret check guarding the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGate {
    secret: String,
}

impl Default for AuthGate {
    fn default() -> Self {
        AuthGate::new(DEFAULT_SHARED_SECRET)
    }
}

impl AuthGate {
    pub fn new(secret: impl Into<String>) -> Self {
        AuthGate {
            secret: secret.into(),
        }
    }

    /// Exact comparison; no lockout after failures.
    pub fn check(&self, attempt: &str) -> EliteResult<()> {
        if attempt == self.secret {
            Ok(())
        } else {
            Err(EliteError::InvalidSecret)
        }
    }
}

/// What the shell needs to know to decide what to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppState {
    section: Section,
    connected: bool,
}

impl AppState {
    /// Restore the connection flag from the store, starting on the home section.
    pub fn load<S: KeyValueStore>(store: &AppStore<S>) -> Self {
        AppState {
            section: Section::Home,
            connected: store.is_connected(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn navigate(&mut self, section: Section) {
        self.section = section;
    }

    /// Open the gate if `attempt` matches; the flag is persisted on success.
    /// On mismatch the state is left untouched.
    pub fn connect<S: KeyValueStore>(
        &mut self,
        gate: &AuthGate,
        attempt: &str,
        store: &mut AppStore<S>,
    ) -> EliteResult<()> {
        gate.check(attempt)?;
        self.connected = true;
        store.set_connected(true);
        info!("Connected");
        Ok(())
    }

    pub fn logout<S: KeyValueStore>(&mut self, store: &mut AppStore<S>) {
        self.connected = false;
        self.section = Section::Home;
        store.set_connected(false);
        info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};

    #[test]
    fn wrong_secret_keeps_the_gate_closed() {
        let mut store = AppStore::new(MemoryStore::new());
        let mut state = AppState::load(&store);
        let gate = AuthGate::default();

        let err = state.connect(&gate, "wrong", &mut store).unwrap_err();
        assert_eq!(err.to_string(), "Mot de passe incorrect");
        assert!(!state.is_connected());
        assert!(!store.is_connected());

        // no lockout
        for _ in 0..10 {
            assert!(state.connect(&gate, "nope", &mut store).is_err());
        }
        state.connect(&gate, DEFAULT_SHARED_SECRET, &mut store).unwrap();
        assert!(state.is_connected());
    }

    #[test]
    fn connection_persists_until_logout() {
        let mut store = AppStore::new(MemoryStore::new());
        let mut state = AppState::load(&store);
        state
            .connect(&AuthGate::new("s3cret"), "s3cret", &mut store)
            .unwrap();
        state.navigate(Section::Finances);

        let restored = AppState::load(&store);
        assert!(restored.is_connected());
        assert_eq!(restored.section(), Section::Home);

        state.logout(&mut store);
        assert!(!state.is_connected());
        assert_eq!(state.section(), Section::Home);
        assert!(!AppState::load(&store).is_connected());
    }

    #[test]
    fn connecting_over_a_corrupt_store_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "garbage").unwrap();

        let mut store = AppStore::new(FileStore::open(&path));
        let mut state = AppState::load(&store);
        assert!(!state.is_connected());
        state
            .connect(&AuthGate::default(), DEFAULT_SHARED_SECRET, &mut store)
            .unwrap();

        let reopened = AppStore::new(FileStore::open(&path));
        assert!(AppState::load(&reopened).is_connected());
    }

    #[test]
    fn secret_comparison_is_exact() {
        let gate = AuthGate::default();
        assert!(gate.check("Banizette").is_err());
        assert!(gate.check(" banizette").is_err());
        assert!(gate.check("banizette").is_ok());
    }

    #[test]
    fn sections_round_trip_through_their_ids() {
        for section in Section::ALL {
            assert_eq!(section.id().parse::<Section>().unwrap(), section);
        }
        assert!("settings".parse::<Section>().is_err());
    }
}
