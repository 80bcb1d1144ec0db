// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::mapper::CvLocale;

pub const DEFAULT_CONFIG_FILE: &str = "autofill.yaml";
const CONFIG_PATH_VAR: &str = "AUTOFILL_CONFIG";
const SETTLE_MS_VAR: &str = "AUTOFILL_SETTLE_MS";

/// Runtime tuning for the engine. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofillConfig {
    /// Pause after each write step, in milliseconds.
    pub settle_ms: u64,
    pub banner_display_ms: u64,
    pub banner_fade_ms: u64,
    /// Month-name language for the rendered CV text.
    pub cv_locale: CvLocale,
}

impl Default for AutofillConfig {
    fn default() -> Self {
        Self {
            settle_ms: 50,
            banner_display_ms: 5000,
            banner_fade_ms: 500,
            cv_locale: CvLocale::Pl,
        }
    }
}

impl AutofillConfig {
    /// Load from `AUTOFILL_CONFIG` or `./autofill.yaml`, falling back to
    /// defaults when no file exists, then apply env overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            info!("Loading configuration from {}", path.display());
            Self::load_from_file(&path)?
        } else {
            debug!("{} not found, using defaults", path.display());
            Self::default()
        };

        if let Ok(raw) = std::env::var(SETTLE_MS_VAR) {
            config.settle_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", SETTLE_MS_VAR, raw))?;
        }

        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn banner_display(&self) -> Duration {
        Duration::from_millis(self.banner_display_ms)
    }

    pub fn banner_fade(&self) -> Duration {
        Duration::from_millis(self.banner_fade_ms)
    }
}
