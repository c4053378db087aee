//! Report exporters.

pub mod json;
pub mod markdown;

use serde::{Deserialize, Serialize};

/// Default heading of exported reports.
pub const DEFAULT_TITLE: &str = "API Changes";

/// Options shared by the exporters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Indented JSON output. Markdown ignores it.
    pub pretty_print: bool,
    pub title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty_print: false,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ExportConfig {
    pub fn new(pretty_print: bool, title: &str) -> Self {
        Self {
            pretty_print,
            title: title.to_string(),
        }
    }

    /// Config for the text exporters, which only read the title.
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }
}
