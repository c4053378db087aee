//! Folds the raw addition/removal stream into report-ready changes.
//!
//! Records are grouped by `(parent path, consolidatable name, declaration kind)`.
//! A removal and an addition in the same group that denote the same
//! declaration become a single modification carrying its field-level diffs;
//! everything else is reported as it is. Repeated records of one node are
//! dropped and the output is sorted, so the same input always yields the
//! same list.

use std::collections::{BTreeMap, HashSet};

use crate::differ::changes::{Change, IndependentChange, IndependentChangeKind};
use crate::element::DeclarationKind;

type GroupKey = (Option<String>, String, DeclarationKind);

/// Consolidate independent records into the final change list.
pub fn consolidate(changes: Vec<IndependentChange<'_>>) -> Vec<Change> {
    let mut groups: BTreeMap<GroupKey, Vec<IndependentChange<'_>>> = BTreeMap::new();
    let mut seen = HashSet::new();

    for change in changes {
        // Repeats always point at the same node; distinct nodes with equal
        // text are distinct changes.
        if !seen.insert((change.kind.clone(), change.element.identity())) {
            continue;
        }

        let parent_path = change.parent_path();
        let key = (
            parent_path,
            change.element.consolidatable_name(),
            change.element.kind(),
        );
        groups.entry(key).or_default().push(change);
    }

    let mut consolidated = Vec::new();
    for ((parent_path, _, _), group) in groups {
        consolidate_group(parent_path, group, &mut consolidated);
    }

    consolidated.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    consolidated
}

fn consolidate_group(
    parent_path: Option<String>,
    group: Vec<IndependentChange<'_>>,
    out: &mut Vec<Change>,
) {
    let (additions, removals): (Vec<_>, Vec<_>) =
        group.into_iter().partition(|c| c.kind.is_addition());

    if let ([addition], [removal]) = (additions.as_slice(), removals.as_slice()) {
        if removal.element.is_diffable(&addition.element) {
            out.push(modification(parent_path, removal, addition));
            return;
        }
    }

    // Several records share the key, typically overloads. Pair each removal
    // with the first unclaimed diffable addition from the same pass.
    let mut claimed = vec![false; additions.len()];
    for removal in &removals {
        let partner = additions
            .iter()
            .enumerate()
            .find(|(i, addition)| {
                !claimed[*i]
                    && addition.old_first == removal.old_first
                    && removal.element.is_diffable(&addition.element)
            })
            .map(|(i, _)| i);
        match partner {
            Some(i) => {
                claimed[i] = true;
                out.push(modification(parent_path.clone(), removal, &additions[i]));
            }
            None => out.push(standalone(parent_path.clone(), removal)),
        }
    }

    for (addition, _) in additions
        .iter()
        .zip(claimed)
        .filter(|(_, claimed)| !claimed)
    {
        out.push(standalone(parent_path.clone(), addition));
    }
}

fn modification(
    parent_path: Option<String>,
    removal: &IndependentChange<'_>,
    addition: &IndependentChange<'_>,
) -> Change {
    let old = removal.element;
    let new = addition.element;
    assert_eq!(
        old.kind(),
        new.kind(),
        "paired declarations of different kinds under {:?}",
        parent_path
    );

    Change::modification(old.description(), new.description(), parent_path, old.kind())
        .with_field_diffs(old.differences(&new))
}

fn standalone(parent_path: Option<String>, change: &IndependentChange<'_>) -> Change {
    let description = change.kind.description().to_string();
    match change.kind {
        IndependentChangeKind::Addition(_) => {
            Change::addition(description, parent_path, change.element.kind())
        }
        IndependentChangeKind::Removal(_) => {
            Change::removal(description, parent_path, change.element.kind())
        }
    }
}
