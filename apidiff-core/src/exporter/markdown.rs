//! Markdown format exporter.

use std::collections::BTreeMap;

use crate::differ::{ApiDiffReport, Change, ChangeKind, UnitReport};
use crate::exporter::ExportConfig;

/// Export a report to Markdown format.
pub fn export(report: &ApiDiffReport, config: &ExportConfig) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# {}", config.title));
    lines.push(String::new());

    if report.units.is_empty() {
        lines.push("No changes".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    lines.push(format!("_{}_", report.summary.text()));
    lines.push(String::new());

    for (name, unit) in &report.units {
        lines.push(export_unit(name, unit));
    }

    lines.join("\n")
}

/// Export a single unit to Markdown.
fn export_unit(name: &str, unit: &UnitReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!("## {}", name));
    lines.push(String::new());

    for warning in &unit.warnings {
        lines.push(format!("> {}", warning));
        lines.push(String::new());
    }

    if unit.changes.is_empty() {
        lines.push("No changes".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    let mut by_parent: BTreeMap<&str, Vec<&Change>> = BTreeMap::new();
    for change in &unit.changes {
        let parent = change.parent_path.as_deref().unwrap_or(name);
        by_parent.entry(parent).or_default().push(change);
    }

    for (parent, changes) in by_parent {
        lines.push(format!("### `{}`", parent));
        lines.push(String::new());
        export_section(&mut lines, "Added", &changes, |c| {
            matches!(c.kind, ChangeKind::Addition { .. })
        });
        export_section(&mut lines, "Modified", &changes, Change::is_modification);
        export_section(&mut lines, "Removed", &changes, |c| {
            matches!(c.kind, ChangeKind::Removal { .. })
        });
    }

    lines.join("\n")
}

fn export_section(
    lines: &mut Vec<String>,
    heading: &str,
    changes: &[&Change],
    include: impl Fn(&Change) -> bool,
) {
    let selected: Vec<&Change> = changes.iter().copied().filter(|c| include(c)).collect();
    if selected.is_empty() {
        return;
    }

    lines.push(format!("#### {}", heading));
    lines.push(String::new());
    for change in selected {
        lines.push("```swift".to_string());
        match &change.kind {
            ChangeKind::Addition { description } | ChangeKind::Removal { description } => {
                lines.push(description.clone());
            }
            ChangeKind::Modification {
                old_description,
                new_description,
            } => {
                lines.push("// From".to_string());
                lines.push(old_description.clone());
                lines.push(String::new());
                lines.push("// To".to_string());
                lines.push(new_description.clone());
            }
        }
        lines.push("```".to_string());
        lines.push(String::new());

        if !change.field_diffs.is_empty() {
            for diff in &change.field_diffs {
                lines.push(format!("- {}", diff));
            }
            lines.push(String::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::DeclarationKind;

    fn report(changes: Vec<Change>, warnings: Vec<String>) -> ApiDiffReport {
        let mut unit = UnitReport::new(changes);
        unit.warnings = warnings;
        let mut units = BTreeMap::new();
        units.insert("MyLib".to_string(), unit);
        ApiDiffReport::new(units)
    }

    #[test]
    fn test_export_empty_report() {
        let output = export(&ApiDiffReport::default(), &ExportConfig::default());
        assert_eq!(output, "# API Changes\n\nNo changes\n");
    }

    #[test]
    fn test_export_unit_without_changes() {
        let output = export(&report(Vec::new(), Vec::new()), &ExportConfig::default());
        assert!(output.contains("## MyLib\n\nNo changes"));
    }

    #[test]
    fn test_export_sections() {
        let changes = vec![
            Change::addition(
                "public struct C".to_string(),
                Some("MyLib".to_string()),
                DeclarationKind::Struct,
            ),
            Change::modification(
                "public func fetch() -> String".to_string(),
                "public func fetch() -> String?".to_string(),
                Some("MyLib.Client".to_string()),
                DeclarationKind::Function,
            )
            .with_field_diffs(vec![
                "return type changed from `String` to `String?`".to_string()
            ]),
            Change::removal(
                "public struct A".to_string(),
                Some("MyLib".to_string()),
                DeclarationKind::Struct,
            ),
        ];
        let warnings = vec!["unit `MyLib` only exists in the new version".to_string()];
        let config = ExportConfig::titled("Release 2.0");

        let output = export(&report(changes, warnings), &config);

        assert!(output.starts_with("# Release 2.0\n\n_1 added, 1 modified, 1 removed_"));
        assert!(output.contains("> unit `MyLib` only exists in the new version"));
        assert!(output.contains("### `MyLib`\n\n#### Added\n\n```swift\npublic struct C\n```"));
        assert!(output.contains("#### Removed\n\n```swift\npublic struct A\n```"));
        assert!(output.contains(
            "### `MyLib.Client`\n\n#### Modified\n\n```swift\n// From\npublic func fetch() -> String\n\n// To\npublic func fetch() -> String?\n```\n\n- return type changed from `String` to `String?`"
        ));
        assert!(output.find("### `MyLib`").unwrap() < output.find("### `MyLib.Client`").unwrap());
    }
}
