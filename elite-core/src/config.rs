//! Global elite configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app_state::{AuthGate, DEFAULT_SHARED_SECRET};
use crate::calendar::ViewMode;
use crate::chat::DEFAULT_REPLY_DELAY;
use crate::error::{EliteError, EliteResult};

fn default_reply_delay_ms() -> u64 {
    DEFAULT_REPLY_DELAY.as_millis() as u64
}

fn is_default_reply_delay_ms(ms: &u64) -> bool {
    *ms == default_reply_delay_ms()
}

fn default_shared_secret() -> String {
    DEFAULT_SHARED_SECRET.to_string()
}

/// Configuration at ~/.config/elite/config.toml
///
/// Every field is optional in the file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EliteConfig {
    /// Where the store file lives. Defaults to the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(
        default = "default_reply_delay_ms",
        skip_serializing_if = "is_default_reply_delay_ms"
    )]
    pub reply_delay_ms: u64,

    #[serde(default = "default_shared_secret")]
    pub shared_secret: String,

    #[serde(default)]
    pub default_view: ViewMode,
}

impl Default for EliteConfig {
    fn default() -> Self {
        EliteConfig {
            data_dir: None,
            reply_delay_ms: default_reply_delay_ms(),
            shared_secret: default_shared_secret(),
            default_view: ViewMode::default(),
        }
    }
}

impl EliteConfig {
    pub fn config_path() -> EliteResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EliteError::Config("Could not determine config directory".into()))?
            .join("elite");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/elite/config.toml, or defaults if it does not exist.
    pub fn load() -> EliteResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> EliteResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| EliteError::Config(format!("Could not read config file: {e}")))?;

        toml::from_str(&content).map_err(|e| EliteError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> EliteResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EliteError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EliteError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| EliteError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EliteResult<()> {
        let contents = format!(
            "\
# elite configuration

# Where the dashboard store lives:
# data_dir = \"~/.local/share/elite\"

# Delay before the assistant answers, in milliseconds:
# reply_delay_ms = {}

# Shared secret asked by `elite connect`:
# shared_secret = \"...\"

# Calendar display mode, \"weekly\" or \"monthly\":
# default_view = \"weekly\"
",
            default_reply_delay_ms()
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EliteError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EliteError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_dir(&self) -> EliteResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join("elite"))
                .ok_or_else(|| EliteError::Config("Could not determine data directory".into())),
        }
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn auth_gate(&self) -> AuthGate {
        AuthGate::new(self.shared_secret.clone())
    }
}
