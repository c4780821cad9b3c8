//! Persisted dashboard state.
//!
//! Everything lives in a flat string key-value store. Reads never fail from the
//! caller's point of view: a missing key, an unreadable store or a corrupt blob
//! all fall back to defaults (logged at `warn`). Writes that fail are logged
//! and dropped. A write over an unparsable file replaces it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{EliteError, EliteResult};
use crate::ledger::LedgerState;
use crate::records::{AppProject, Prospect, Reminder, Subscription};

pub const LEDGER_KEY: &str = "elite-app-store";
pub const CONNECTED_KEY: &str = "elite-connected";
pub const REMINDERS_KEY: &str = "elite-reminders";
pub const PROSPECTS_KEY: &str = "elite-prospects";
pub const SUBSCRIPTIONS_KEY: &str = "elite-subscriptions";
pub const APPS_KEY: &str = "elite-apps";

const STORE_FILE: &str = "store.json";

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> EliteResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> EliteResult<()>;
    fn remove(&mut self, key: &str) -> EliteResult<()>;
}

/// In-process store, lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> EliteResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EliteResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> EliteResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All keys in one JSON object file, rewritten atomically on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// `store.json` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::open(data_dir.join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> EliteResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| EliteError::Store(e.to_string()))
    }

    /// Like `read_all`, but an unparsable file counts as empty so the next
    /// write repairs it. IO failures still propagate. The flag is set when the
    /// file was corrupt.
    fn read_for_write(&self) -> EliteResult<(BTreeMap<String, String>, bool)> {
        match self.read_all() {
            Ok(entries) => Ok((entries, false)),
            Err(EliteError::Store(e)) => {
                warn!(path = %self.path.display(), error = %e, "Store file is corrupt, starting over");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> EliteResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| EliteError::Serialization(e.to_string()))?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> EliteResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> EliteResult<()> {
        let (mut entries, _) = self.read_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> EliteResult<()> {
        let (mut entries, corrupt) = self.read_for_write()?;
        if entries.remove(key).is_some() || corrupt {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Typed access to the dashboard's keys.
#[derive(Debug, Clone)]
pub struct AppStore<S> {
    store: S,
}

impl<S: KeyValueStore> AppStore<S> {
    pub fn new(store: S) -> Self {
        AppStore { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    fn load_or<T, F>(&self, key: &str, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %e, "Stored value is not valid, using defaults");
                    fallback()
                }
            },
            Ok(None) => {
                debug!(key, "Nothing stored, using defaults");
                fallback()
            }
            Err(e) => {
                warn!(key, error = %e, "Could not read store, using defaults");
                fallback()
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Could not serialize value, not saved");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &raw) {
            warn!(key, error = %e, "Could not write store, not saved");
        }
    }

    pub fn load_ledger(&self) -> LedgerState {
        self.load_or(LEDGER_KEY, LedgerState::default)
    }

    pub fn save_ledger(&mut self, ledger: &LedgerState) {
        self.save(LEDGER_KEY, ledger);
    }

    pub fn load_reminders(&self) -> Vec<Reminder> {
        self.load_or(REMINDERS_KEY, Vec::new)
    }

    pub fn save_reminders(&mut self, reminders: &[Reminder]) {
        self.save(REMINDERS_KEY, &reminders);
    }

    pub fn load_prospects(&self) -> Vec<Prospect> {
        self.load_or(PROSPECTS_KEY, Vec::new)
    }

    pub fn save_prospects(&mut self, prospects: &[Prospect]) {
        self.save(PROSPECTS_KEY, &prospects);
    }

    pub fn load_subscriptions(&self) -> Vec<Subscription> {
        self.load_or(SUBSCRIPTIONS_KEY, Vec::new)
    }

    pub fn save_subscriptions(&mut self, subscriptions: &[Subscription]) {
        self.save(SUBSCRIPTIONS_KEY, &subscriptions);
    }

    pub fn load_apps(&self) -> Vec<AppProject> {
        self.load_or(APPS_KEY, Vec::new)
    }

    pub fn save_apps(&mut self, apps: &[AppProject]) {
        self.save(APPS_KEY, &apps);
    }

    /// The connection flag is the string `"true"`; anything else is disconnected.
    pub fn is_connected(&self) -> bool {
        match self.store.get(CONNECTED_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!(error = %e, "Could not read connection flag");
                false
            }
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        let result = if connected {
            self.store.set(CONNECTED_KEY, "true")
        } else {
            self.store.remove(CONNECTED_KEY)
        };
        if let Err(e) = result {
            warn!(error = %e, "Could not write connection flag");
        }
    }
}
