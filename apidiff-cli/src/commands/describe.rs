//! Describe command - render the declaration trees of a dump
//!
//! Prints the recursive description of each unit exactly as the diff engine
//! sees it, which makes problems in a dump producer easy to spot.

use std::path::Path;

use anyhow::Context;
use apidiff_core::loader::{build_trees, load_unit};
use apidiff_core::DeclarationTree;
use colored::Colorize;
use serde::Serialize;

use super::{load_dump, read_dump_text};
use crate::output::{Output, OutputConfig, Outputter};

/// Rendering of a single unit
#[derive(Debug, Serialize)]
pub struct UnitDescription {
    pub name: String,
    pub declarations: usize,
    pub description: String,
}

impl UnitDescription {
    fn from_tree(tree: &DeclarationTree) -> Self {
        Self {
            name: tree.unit_name().to_string(),
            declarations: tree.len() - 1,
            description: tree.root().recursive_description().to_string(),
        }
    }
}

/// Describe result collection
#[derive(Debug, Serialize)]
pub struct DescribeResult {
    pub dump: String,
    pub units: Vec<UnitDescription>,
}

impl Outputter for DescribeResult {
    fn to_table(&self, _config: &OutputConfig) -> String {
        let mut output = format!("{} {}\n", "DUMP:".cyan().bold(), self.dump);

        for unit in &self.units {
            output.push_str(&format!(
                "\n{} {}\n",
                unit.name.bold(),
                format!("({} declarations)", unit.declarations).dimmed()
            ));
            output.push_str(&unit.description);
            output.push('\n');
        }

        output.trim_end().to_string()
    }

    fn to_markdown(&self) -> String {
        let mut lines = Vec::new();
        for unit in &self.units {
            lines.push(format!("## {}", unit.name));
            lines.push(String::new());
            lines.push("```swift".to_string());
            lines.push(unit.description.clone());
            lines.push("```".to_string());
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

/// Run the describe command
pub async fn run(dump_path: &Path, units: &[String], config: OutputConfig) -> anyhow::Result<()> {
    let trees = if units.is_empty() {
        let dump = load_dump(dump_path).await?;
        build_trees(&dump)
            .with_context(|| format!("Invalid declaration dump {}", dump_path.display()))?
    } else {
        let text = read_dump_text(dump_path).await?;
        units
            .iter()
            .map(|name| {
                load_unit(&text, name)
                    .with_context(|| format!("Failed to load unit from {}", dump_path.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let result = DescribeResult {
        dump: dump_path.display().to_string(),
        units: trees.iter().map(UnitDescription::from_tree).collect(),
    };

    Output::new(&result, config).render(None)
}
