use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::calc::inputs::{SplitCount, TipPercentage};

const DEFAULT_TIP_STEP: i32 = 1;

fn default_split() -> u32 {
    SplitCount::MIN
}

fn default_tip_step() -> i32 {
    DEFAULT_TIP_STEP
}

fn default_currency() -> String {
    "$".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Split count the form starts with (clamped to 1..=10)
    #[serde(default = "default_split")]
    pub default_split: u32,

    /// Tip percentage the slider starts at (clamped to 0..=100)
    #[serde(default)]
    pub default_tip_percent: i32,

    /// Percentage points moved per slider key press
    #[serde(default = "default_tip_step")]
    pub tip_step: i32,

    /// Prefix for displayed amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_split: default_split(),
            default_tip_percent: 0,
            tip_step: default_tip_step(),
            currency_symbol: default_currency(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("tipcalc");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!("{}", e);
                AppConfig::default()
            }
        }
    }

    /// Load config from a file. Missing or broken files give defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return AppConfig::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => return config.sanitized(),
                Err(e) => tracing::warn!("Failed to parse config {}: {}", path.display(), e),
            },
            Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
        }

        AppConfig::default()
    }

    /// Save config to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(&self.clone().sanitized())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Pull out-of-range values back into the form's bounds
    fn sanitized(mut self) -> Self {
        self.default_split = SplitCount::new(self.default_split).get();
        self.default_tip_percent = TipPercentage::new(self.default_tip_percent).get();
        if self.tip_step < 1 {
            self.tip_step = DEFAULT_TIP_STEP;
        }
        if self.currency_symbol.contains('\x1b') {
            self.currency_symbol = default_currency();
        }
        self
    }

    pub fn initial_split(&self) -> SplitCount {
        SplitCount::new(self.default_split)
    }

    pub fn initial_tip(&self) -> TipPercentage {
        TipPercentage::new(self.default_tip_percent)
    }
}
