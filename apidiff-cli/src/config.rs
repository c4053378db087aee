//! apidiff configuration loading from `.apidiffrc.toml`.
//!
//! Configuration is optional - apidiff uses sensible defaults if no config
//! file exists in the working directory.
//!
//! # Example Configuration
//!
//! ```toml
//! [output]
//! format = "markdown"
//! color = false
//!
//! [diff]
//! units = ["MyLib", "MyLibUI"]
//! ignore_units = ["MyLibTestSupport"]
//!
//! [report]
//! title = "MyLib 2.0 API Changes"
//! ```

use serde::Deserialize;
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = ".apidiffrc.toml";

/// Root configuration structure loaded from `.apidiffrc.toml`.
///
/// All sections are optional and will use defaults if not specified.
#[derive(Debug, Deserialize, Default)]
pub struct ApiDiffConfig {
    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Which units take part in a diff.
    #[serde(default)]
    pub diff: DiffSettings,

    /// Report presentation.
    #[serde(default)]
    pub report: ReportSettings,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table`, `json` or `markdown`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Auto-detected when unset.
    #[serde(default)]
    pub color: Option<bool>,
}

/// Unit selection for `apidiff diff`.
#[derive(Debug, Deserialize, Default)]
pub struct DiffSettings {
    /// Only diff these units. Empty means every unit in either dump.
    #[serde(default)]
    pub units: Vec<String>,

    /// Units that are never diffed, even when listed in `units`.
    #[serde(default)]
    pub ignore_units: Vec<String>,
}

/// Report presentation settings.
#[derive(Debug, Deserialize, Default)]
pub struct ReportSettings {
    /// Title used for Markdown reports.
    #[serde(default)]
    pub title: Option<String>,
}

impl ApiDiffConfig {
    /// Load configuration from `.apidiffrc.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured color preference, or `None` to auto-detect.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    /// Get the report title, falling back to the exporter default.
    pub fn report_title(&self) -> &str {
        self.report
            .title
            .as_deref()
            .unwrap_or(apidiff_core::exporter::DEFAULT_TITLE)
    }

    /// Build the unit filter for a run.
    ///
    /// Units named on the command line replace the configured `units` list;
    /// `ignore_units` always applies.
    pub fn unit_filter(&self, cli_units: &[String]) -> UnitFilter {
        let include = if cli_units.is_empty() {
            self.diff.units.clone()
        } else {
            cli_units.to_vec()
        };
        UnitFilter {
            include,
            ignore: self.diff.ignore_units.clone(),
        }
    }
}

/// Decides which units take part in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitFilter {
    /// Explicitly selected units. Empty selects everything.
    pub include: Vec<String>,
    pub ignore: Vec<String>,
}

impl UnitFilter {
    pub fn allows(&self, unit: &str) -> bool {
        if self.ignore.iter().any(|u| u == unit) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|u| u == unit)
    }

    /// Selected units that are not in `available`.
    pub fn missing<'a>(&'a self, available: &[&str]) -> Vec<&'a str> {
        self.include
            .iter()
            .map(String::as_str)
            .filter(|u| !available.contains(u))
            .collect()
    }
}
