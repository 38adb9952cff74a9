//! Runtime and deployment configuration
//!
//! Both halves deserialize from JSON with every field optional; missing
//! fields fall back to the stock installation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use prompter_core::{names, Directive, DirectiveCatalog, DirectiveError, DirectiveId};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Control loop settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Tick interval in milliseconds (60 fps by default)
    pub tick_interval_ms: u64,
    /// A person counts as present when their confidence is strictly above this
    pub presence_threshold: f32,
    /// Queued discrete events beyond this are dropped
    pub max_pending_events: usize,
    /// File extensions accepted as media; empty accepts any file
    pub media_extensions: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            tick_interval_ms: 16,
            presence_threshold: 0.5,
            max_pending_events: 64,
            media_extensions: ["mov", "mp4", "m4v", "avi"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl RuntimeConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.presence_threshold) {
            return Err(ConfigError::Invalid(format!(
                "presence_threshold must be in [0, 1], got {}",
                self.presence_threshold
            )));
        }
        if self.max_pending_events == 0 {
            return Err(ConfigError::Invalid("max_pending_events must be > 0".into()));
        }
        Ok(())
    }
}

/// Which directives exist and which are asserted at startup
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    /// Registered in order
    pub directives: Vec<Directive>,
    /// Pushed in order once the catalog is built. Order matters: equal
    /// priorities keep the earliest push active.
    pub startup: Vec<DirectiveId>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        DeploymentConfig {
            directives: Directive::defaults(),
            startup: vec![
                DirectiveId::new(names::NO_USER),
                DirectiveId::new(names::NO_BACKGROUND_VIDEO),
                DirectiveId::new(names::NO_FOREGROUND_VIDEO),
            ],
        }
    }
}

impl DeploymentConfig {
    /// Build the catalog, rejecting malformed definitions and startup
    /// entries that name unregistered directives
    pub fn build_catalog(&self) -> ConfigResult<DirectiveCatalog> {
        let catalog = DirectiveCatalog::from_directives(self.directives.iter().cloned())?;

        let mut seen = HashSet::new();
        for id in &self.startup {
            catalog.require(id.as_str())?;
            if !seen.insert(id.as_str()) {
                return Err(DirectiveError::DuplicateDirective(id.clone()).into());
            }
        }
        Ok(catalog)
    }
}

/// Complete configuration file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrompterConfig {
    pub runtime: RuntimeConfig,
    pub deployment: DeploymentConfig,
}

impl PrompterConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate JSON config text
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: PrompterConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.runtime.validate()?;
        self.deployment.build_catalog()?;
        Ok(())
    }
}
