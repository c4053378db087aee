//! Output formatting module for apidiff CLI.
//!
//! Provides a unified output system supporting multiple formats:
//! - Table: Human-readable colored output with a summary table (default)
//! - JSON: Machine-readable JSON output
//! - Markdown: Changelog-style output suitable for release notes

pub mod json;
pub mod table;

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

pub use json::JsonOutput;
pub use table::TableOutput;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable colored output (default)
    #[default]
    Table,
    /// Machine-readable JSON output
    Json,
    /// Markdown changelog
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// The output format to use
    pub format: OutputFormat,
    /// Disable ANSI colors
    pub no_color: bool,
    /// Disable truncation of long declarations
    pub no_truncate: bool,
    /// Terminal width (auto-detected if None)
    pub width: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            no_color: false,
            no_truncate: false,
            width: None,
        }
    }
}

impl OutputConfig {
    /// Create a new output config with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Auto-detect settings from the environment, with an optional color
    /// override coming from the configuration file.
    pub fn auto_detect_with_color_override(format: OutputFormat, use_color: Option<bool>) -> Self {
        let is_tty = is_tty();
        let no_color = match use_color {
            Some(enabled) => !enabled,
            None => !is_tty || std::env::var("NO_COLOR").is_ok(),
        };

        Self {
            no_color,
            no_truncate: !is_tty,
            width: terminal_width(),
            ..Self::new(format)
        }
    }

    /// Plain rendering for output written to a file.
    pub fn for_file(mut self) -> Self {
        self.no_color = true;
        self.no_truncate = true;
        self
    }

    /// Get the effective terminal width
    pub fn effective_width(&self) -> usize {
        self.width.unwrap_or(100)
    }

    /// Check if truncation should be applied
    pub fn should_truncate(&self) -> bool {
        !self.no_truncate
    }
}

/// Trait for types that can be rendered in every output format
pub trait Outputter: Serialize {
    /// Render as human-readable colored text
    fn to_table(&self, config: &OutputConfig) -> String;

    /// Render as Markdown
    fn to_markdown(&self) -> String;

    /// Render as JSON
    fn to_json(&self, pretty: bool) -> String {
        JsonOutput::format(self, pretty)
    }

    /// Render according to the configured format
    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(true),
            OutputFormat::Markdown => self.to_markdown(),
        }
    }
}

/// Wrapper pairing a result with its output settings
pub struct Output<'a, T: Outputter> {
    data: &'a T,
    config: OutputConfig,
}

impl<'a, T: Outputter> Output<'a, T> {
    pub fn new(data: &'a T, config: OutputConfig) -> Self {
        Self { data, config }
    }

    /// Render to a string without printing
    pub fn render_to_string(&self) -> String {
        self.data.render(&self.config)
    }

    /// Write the rendered output to stdout, or to `path` when given.
    pub fn render(&self, path: Option<&Path>) -> anyhow::Result<()> {
        let config = match path {
            Some(_) => self.config.clone().for_file(),
            None => self.config.clone(),
        };
        if config.no_color {
            colored::control::set_override(false);
        }

        match path {
            Some(path) => {
                let mut rendered = self.data.render(&config);
                if !rendered.ends_with('\n') {
                    rendered.push('\n');
                }
                std::fs::write(path, rendered)?;
                tracing::info!("Wrote report to {}", path.display());
            }
            None => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", self.render_to_string())?;
            }
        }
        Ok(())
    }
}

/// Truncate a string to a maximum display width, adding an ellipsis
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return s.chars().take(max_width).collect();
    }
    let mut out: String = s.chars().take(max_width - 3).collect();
    out.push_str("...");
    out
}

/// Check if stdout is a TTY
pub fn is_tty() -> bool {
    io::stdout().is_terminal()
}

/// Get the terminal width if available
pub fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}
