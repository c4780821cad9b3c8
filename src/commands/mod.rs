pub mod auth;
pub mod calendar;
pub mod chat;
pub mod ledger;
pub mod prospect;
pub mod subscription;

use anyhow::Result;
use elite_core::app_state::AppState;
use elite_core::config::EliteConfig;
use elite_core::store::{AppStore, FileStore};
use tracing::debug;

/// Everything a command needs, loaded once per invocation.
pub struct Context {
    pub config: EliteConfig,
    pub store: AppStore<FileStore>,
    pub state: AppState,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config_path = EliteConfig::config_path()?;
        if !config_path.exists() {
            EliteConfig::create_default_config(&config_path)?;
            debug!(path = %config_path.display(), "Created default config");
        }
        let config = EliteConfig::load_from(&config_path)?;

        let data_dir = config.data_dir()?;
        let ctx = Context::new(config, AppStore::new(FileStore::in_dir(&data_dir)));
        debug!(
            store = %ctx.store.inner().path().display(),
            connected = ctx.state.is_connected(),
            "Loaded context"
        );
        Ok(ctx)
    }

    pub fn new(config: EliteConfig, store: AppStore<FileStore>) -> Self {
        let state = AppState::load(&store);
        Context {
            config,
            store,
            state,
        }
    }

    pub fn require_connected(&self) -> Result<()> {
        if !self.state.is_connected() {
            anyhow::bail!(
                "Not connected.\n\n\
                Unlock the dashboard with:\n  \
                elite connect --secret <secret>"
            );
        }
        Ok(())
    }
}

/// A context over a fresh store in a temp dir.
#[cfg(test)]
pub(crate) fn test_context(dir: &std::path::Path) -> Context {
    Context::new(EliteConfig::default(), AppStore::new(FileStore::in_dir(dir)))
}
