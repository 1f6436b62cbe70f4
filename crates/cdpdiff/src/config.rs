//! Configuration system for cdpdiff.
//!
//! Loads config from (later layers override earlier ones):
//! 1. Global: ~/.config/cdpdiff/config.toml
//! 2. Per-project: .cdpdiff/config.toml
//! 3. Explicit: --config PATH
//!
//! Example config.toml:
//! ```toml
//! [markers]
//! request = "->"       # prefix of outbound lines
//! response = "<-"      # prefix of inbound lines
//!
//! [report]
//! limit = 20           # max records listed per section (0 = unlimited)
//!
//! [pretty]
//! enabled = true       # auto-enable when TTY (default: auto)
//! colors = "auto"      # "auto", "always", or "never"
//! ```

use crate::merge::Merge;
use crate::output::PrettyConfig;
use rhizome_cdpdiff_log::Markers;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Line marker configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MarkersConfig {
    /// Outbound prefix. Default: "->"
    pub request: Option<String>,
    /// Inbound prefix. Default: "<-"
    pub response: Option<String>,
}

impl MarkersConfig {
    pub fn markers(&self) -> Markers {
        let defaults = Markers::default();
        Markers {
            request: self.request.clone().unwrap_or(defaults.request),
            response: self.response.clone().unwrap_or(defaults.response),
        }
    }
}

impl Merge for MarkersConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            request: self.request.merge(other.request),
            response: self.response.merge(other.response),
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Max records listed per section. Default: 0 (unlimited)
    pub limit: Option<usize>,
}

impl ReportConfig {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(0)
    }
}

impl Merge for ReportConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            limit: self.limit.merge(other.limit),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CdpdiffConfig {
    pub markers: MarkersConfig,
    pub report: ReportConfig,
    pub pretty: PrettyConfig,
}

impl Merge for CdpdiffConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            markers: self.markers.merge(other.markers),
            report: self.report.merge(other.report),
            pretty: self.pretty.merge(other.pretty),
        }
    }
}

impl CdpdiffConfig {
    /// Load configuration for a project, plus an optional explicit file.
    ///
    /// Missing files are skipped. Unparsable files are skipped with a warning.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Self {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::load_file(&global_path) {
                config = config.merge(global);
            }
        }

        let project_path = root.join(".cdpdiff").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        if let Some(path) = explicit {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "config file not found");
            } else if let Some(explicit) = Self::load_file(path) {
                config = config.merge(explicit);
            }
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("cdpdiff").join("config.toml"))
    }

    /// Load config from a file path.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }
}
