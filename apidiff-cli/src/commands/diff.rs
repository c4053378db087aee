//! Diff command - API changes between two declaration dumps
//!
//! Loads the old and new dumps, diffs every selected unit and renders the
//! grouped changelog.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use apidiff_core::exporter::{json, markdown, ExportConfig};
use apidiff_core::{ApiDiffReport, Change, ChangeKind, UnitReport};
use colored::Colorize;
use serde::Serialize;

use super::load_dump;
use crate::config::UnitFilter;
use crate::output::{truncate, Output, OutputConfig, Outputter, TableOutput};

/// Options for a diff run, merged from CLI flags and configuration.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub filter: UnitFilter,
    pub output: Option<PathBuf>,
    pub title: String,
}

/// Diff result: the report plus the inputs it was computed from.
///
/// Serializes as the bare report; the paths only head the table view.
#[derive(Debug, Serialize)]
pub struct DiffResult {
    #[serde(skip)]
    pub old: String,
    #[serde(skip)]
    pub new: String,
    #[serde(flatten)]
    pub report: ApiDiffReport,
    #[serde(skip)]
    pub title: String,
}

impl DiffResult {
    fn summary_rows(&self) -> Vec<Vec<String>> {
        self.report
            .units
            .iter()
            .map(|(name, unit)| {
                vec![
                    name.clone(),
                    unit.summary.additions.to_string(),
                    unit.summary.modifications.to_string(),
                    unit.summary.removals.to_string(),
                ]
            })
            .collect()
    }
}

impl Outputter for DiffResult {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} -> {}\n",
            "DIFF:".cyan().bold(),
            self.old.yellow(),
            self.new.green()
        ));
        output.push_str(&format!(
            "Found {} changes in {} units ({:.2}ms)\n",
            self.report.change_count().to_string().cyan(),
            self.report.units.len(),
            self.report.duration_ms
        ));

        if self.report.units.is_empty() {
            output.push_str(&format!("\n{}", "No changes".dimmed()));
            return output;
        }

        output.push('\n');
        output.push_str(&TableOutput::from_rows(
            &["Unit", "Added", "Modified", "Removed"],
            &self.summary_rows(),
            config,
        ));
        output.push('\n');

        for (name, unit) in &self.report.units {
            output.push('\n');
            output.push_str(&format_unit(name, unit, config));
        }

        output.trim_end().to_string()
    }

    fn to_json(&self, pretty: bool) -> String {
        json::export(&self.report, &ExportConfig::new(pretty, &self.title))
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn to_markdown(&self) -> String {
        markdown::export(&self.report, &ExportConfig::titled(&self.title))
    }
}

fn format_unit(name: &str, unit: &UnitReport, config: &OutputConfig) -> String {
    let mut output = format!("{}\n", name.bold());

    for warning in &unit.warnings {
        output.push_str(&format!("  {} {}\n", "!".yellow().bold(), warning.yellow()));
    }

    if unit.changes.is_empty() {
        output.push_str(&format!("  {}\n", "No changes".dimmed()));
        return output;
    }

    let width = config.effective_width().saturating_sub(8);
    let fit = |s: &str| {
        if config.should_truncate() {
            truncate(s, width)
        } else {
            s.to_string()
        }
    };

    let added: Vec<&Change> = unit
        .changes
        .iter()
        .filter(|c| matches!(c.kind, ChangeKind::Addition { .. }))
        .collect();
    let modified: Vec<&Change> = unit.changes.iter().filter(|c| c.is_modification()).collect();
    let removed: Vec<&Change> = unit
        .changes
        .iter()
        .filter(|c| matches!(c.kind, ChangeKind::Removal { .. }))
        .collect();

    if !added.is_empty() {
        output.push_str(&format!(
            "  {} ({}):\n",
            "ADDED".green().bold(),
            added.len()
        ));
        for change in added {
            output.push_str(&format!(
                "    {} {} {}\n",
                "+".green(),
                fit(change.kind.primary_description()),
                parent_label(change).dimmed()
            ));
        }
    }

    if !modified.is_empty() {
        output.push_str(&format!(
            "  {} ({}):\n",
            "MODIFIED".yellow().bold(),
            modified.len()
        ));
        for change in modified {
            if let ChangeKind::Modification {
                old_description,
                new_description,
            } = &change.kind
            {
                output.push_str(&format!(
                    "    {} {} {}\n",
                    "~".yellow(),
                    fit(old_description),
                    parent_label(change).dimmed()
                ));
                output.push_str(&format!("      {} {}\n", "->".dimmed(), fit(new_description)));
            }
            for diff in &change.field_diffs {
                output.push_str(&format!("        {} {}\n", "*".dimmed(), diff));
            }
        }
    }

    if !removed.is_empty() {
        output.push_str(&format!(
            "  {} ({}):\n",
            "REMOVED".red().bold(),
            removed.len()
        ));
        for change in removed {
            output.push_str(&format!(
                "    {} {} {}\n",
                "-".red(),
                fit(change.kind.primary_description()),
                parent_label(change).dimmed()
            ));
        }
    }

    output
}

fn parent_label(change: &Change) -> String {
    match &change.parent_path {
        Some(path) => format!("({})", path),
        None => String::new(),
    }
}

/// Drop units the filter excludes, failing on explicitly selected units
/// that neither dump contains.
fn select_units(
    old: &mut apidiff_core::types::InterfaceDump,
    new: &mut apidiff_core::types::InterfaceDump,
    filter: &UnitFilter,
) -> anyhow::Result<()> {
    let available: BTreeSet<&str> = old
        .unit_names()
        .into_iter()
        .chain(new.unit_names())
        .collect();
    let available: Vec<&str> = available.into_iter().collect();

    let missing = filter.missing(&available);
    if !missing.is_empty() {
        anyhow::bail!("Unit not found in either dump: {}", missing.join(", "));
    }

    old.units.retain(|u| filter.allows(&u.name));
    new.units.retain(|u| filter.allows(&u.name));
    Ok(())
}

/// Run the diff command. Returns whether any change was found.
pub async fn run(
    old_path: &Path,
    new_path: &Path,
    options: &DiffOptions,
    config: OutputConfig,
) -> anyhow::Result<bool> {
    let (mut old, mut new) = tokio::try_join!(load_dump(old_path), load_dump(new_path))?;
    select_units(&mut old, &mut new, &options.filter)?;

    let report = apidiff_core::diff_dumps(&old, &new).context("Failed to diff declaration dumps")?;
    tracing::info!(
        "Diffed {} units in {:.2}ms: {}",
        report.units.len(),
        report.duration_ms,
        report.summary_text
    );

    let result = DiffResult {
        old: old_path.display().to_string(),
        new: new_path.display().to_string(),
        report,
        title: options.title.clone(),
    };

    Output::new(&result, config).render(options.output.as_deref())?;
    Ok(result.report.has_changes())
}
