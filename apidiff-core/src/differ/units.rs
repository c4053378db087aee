//! Per-unit orchestration of the diff engine.

use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use crate::differ::changes::{ApiDiffReport, Change, UnitReport};
use crate::differ::comparator::compare;
use crate::element::DeclarationTree;
use crate::error::Result;
use crate::loader::build_trees;
use crate::types::InterfaceDump;

/// Diff two versions of one unit.
pub fn diff_unit(old: &DeclarationTree, new: &DeclarationTree) -> Vec<Change> {
    compare(old.root(), new.root())
}

/// Diff every unit of two versions, matching units by name.
///
/// Units are independent and compared in parallel. A unit present on one
/// side only is compared against an empty unit of the same name, so all of
/// its declarations show up as additions or removals, and it carries a
/// warning saying so.
///
/// # Panics
///
/// Panics if a unit name appears twice on the same side.
pub fn diff_units(old_units: &[DeclarationTree], new_units: &[DeclarationTree]) -> ApiDiffReport {
    let start = Instant::now();

    let old_by_name: HashMap<&str, &DeclarationTree> =
        old_units.iter().map(|t| (t.unit_name(), t)).collect();
    let new_by_name: HashMap<&str, &DeclarationTree> =
        new_units.iter().map(|t| (t.unit_name(), t)).collect();
    assert_eq!(old_by_name.len(), old_units.len(), "duplicate unit name in old units");
    assert_eq!(new_by_name.len(), new_units.len(), "duplicate unit name in new units");

    let names: Vec<&str> = old_by_name
        .keys()
        .chain(new_by_name.keys())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let units: BTreeMap<String, UnitReport> = names
        .par_iter()
        .map(|name| {
            let report = match (old_by_name.get(name), new_by_name.get(name)) {
                (Some(old), Some(new)) => UnitReport::new(diff_unit(old, new)),
                (Some(old), None) => {
                    let empty = DeclarationTree::new(*name);
                    UnitReport::new(diff_unit(old, &empty)).with_warning(format!(
                        "unit `{}` only exists in the old version",
                        name
                    ))
                }
                (None, Some(new)) => {
                    let empty = DeclarationTree::new(*name);
                    UnitReport::new(diff_unit(&empty, new)).with_warning(format!(
                        "unit `{}` only exists in the new version",
                        name
                    ))
                }
                (None, None) => UnitReport::default(),
            };
            (name.to_string(), report)
        })
        .collect();

    let mut report = ApiDiffReport::new(units);
    report.finalize(start.elapsed().as_secs_f64() * 1000.0);
    report
}

/// Build trees for every unit of both dumps and diff them.
pub fn diff_dumps(old: &InterfaceDump, new: &InterfaceDump) -> Result<ApiDiffReport> {
    let old_units = build_trees(old)?;
    let new_units = build_trees(new)?;
    Ok(diff_units(&old_units, &new_units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::changes::ChangeKind;
    use crate::element::Declaration;
    use crate::types::TypeDef;

    fn unit(name: &str, types: &[&str]) -> DeclarationTree {
        let mut tree = DeclarationTree::new(name);
        for ty in types {
            tree.add_child(tree.root_id(), Declaration::Struct(TypeDef::named(ty)));
        }
        tree
    }

    #[test]
    fn test_diff_units_keyed_by_name() {
        let old = vec![unit("Core", &["A", "B"]), unit("UI", &["View"])];
        let new = vec![unit("UI", &["View"]), unit("Core", &["B", "C"])];

        let report = diff_units(&old, &new);

        assert_eq!(report.unit_names(), vec!["Core", "UI"]);
        assert_eq!(report.change_count(), 2);
        assert!(!report.unit("UI").unwrap().has_changes());
        assert_eq!(report.summary_text, "1 added, 1 removed");
        assert!(report.duration_ms >= 0.0);
    }

    #[test]
    fn test_one_sided_unit_warns() {
        let old = vec![unit("Core", &["A"])];
        let new = vec![unit("Core", &["A"]), unit("Extras", &["Helper"])];

        let report = diff_units(&old, &new);
        let extras = report.unit("Extras").unwrap();

        assert_eq!(
            extras.warnings,
            vec!["unit `Extras` only exists in the new version"]
        );
        assert_eq!(extras.changes.len(), 1);
        assert_eq!(
            extras.changes[0].kind,
            ChangeKind::Addition {
                description: "public struct Helper".to_string()
            }
        );
        assert_eq!(extras.changes[0].parent_path.as_deref(), Some("Extras"));
        assert!(report.unit("Core").unwrap().warnings.is_empty());
    }

    #[test]
    fn test_removed_unit_warns() {
        let old = vec![unit("Legacy", &["Old"])];
        let report = diff_units(&old, &[]);
        let legacy = report.unit("Legacy").unwrap();

        assert_eq!(
            legacy.warnings,
            vec!["unit `Legacy` only exists in the old version"]
        );
        assert_eq!(legacy.summary.removals, 1);
    }

    #[test]
    #[should_panic(expected = "duplicate unit name in old units")]
    fn test_duplicate_unit_names_panic() {
        let old = vec![unit("M", &["A"]), unit("M", &["B"])];
        diff_units(&old, &[]);
    }

    #[test]
    fn test_diff_dumps_rejects_duplicate_units() {
        let old = crate::loader::parse_dump(
            r#"{ "units": [
                { "name": "M", "declarations": [ { "kind": "struct", "name": "A" } ] },
                { "name": "M", "declarations": [ { "kind": "struct", "name": "B" } ] }
            ] }"#,
        )
        .unwrap();
        let new = crate::loader::parse_dump(r#"{ "units": [ { "name": "M" } ] }"#).unwrap();

        assert!(matches!(
            diff_dumps(&old, &new),
            Err(crate::error::ApiDiffError::InvalidDeclaration { .. })
        ));
    }
}
