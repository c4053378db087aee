//! Two-pass recursive comparison of declaration trees.
//!
//! The tree pair is walked twice: old→new discovers removals and, for every
//! node whose own text changed, the removal/addition pair describing it;
//! new→old discovers additions. Matching only ever looks from one node's
//! children into the other node's children, so the two halves of a changed
//! declaration are re-paired afterwards by the consolidator.

use std::collections::HashSet;

use crate::differ::changes::{Change, IndependentChange};
use crate::differ::consolidator::consolidate;
use crate::element::Element;

/// Compare two versions of the same unit and return the consolidated changes.
pub fn compare<'a>(old: Element<'a>, new: Element<'a>) -> Vec<Change> {
    consolidate(independent_changes(old, new))
}

/// Run both directional passes and return the raw, unconsolidated records.
pub fn independent_changes<'a>(old: Element<'a>, new: Element<'a>) -> Vec<IndependentChange<'a>> {
    let mut changes = Vec::new();
    recursive_compare(old, new, true, true, &mut changes);
    recursive_compare(new, old, false, true, &mut changes);
    changes
}

fn recursive_compare<'a>(
    lhs: Element<'a>,
    rhs: Element<'a>,
    old_first: bool,
    is_root: bool,
    changes: &mut Vec<IndependentChange<'a>>,
) {
    if lhs.recursive_description() == rhs.recursive_description() {
        return;
    }

    // Only the old→new pass reports a node's own change, so each changed
    // node yields a single removal/addition pair.
    if !is_root && old_first {
        let lhs_description = lhs.description();
        if lhs_description != rhs.description() {
            changes.push(IndependentChange::removal(lhs_description, lhs, old_first));
            changes.push(IndependentChange::addition(
                rhs.recursive_description().to_string(),
                rhs,
                old_first,
            ));
        }
    }

    let candidates: Vec<Candidate<'a>> = rhs
        .children()
        .map(|element| Candidate {
            element,
            description: element.description(),
        })
        .collect();

    for child in lhs.children() {
        match find_counterpart(child, &candidates) {
            Counterpart::Identical => {}
            Counterpart::Matched(other) => {
                recursive_compare(child, other, old_first, false, changes);
            }
            Counterpart::Missing if old_first => {
                changes.push(IndependentChange::removal(child.description(), child, old_first));
            }
            Counterpart::Missing => {
                changes.push(IndependentChange::addition(
                    child.recursive_description().to_string(),
                    child,
                    old_first,
                ));
            }
        }
    }
}

struct Candidate<'a> {
    element: Element<'a>,
    description: String,
}

enum Counterpart<'a> {
    Identical,
    Matched(Element<'a>),
    Missing,
}

/// Locate `child`'s counterpart among `candidates`, trying in order: an
/// identical subtree, an identical own description, then a diffable node.
fn find_counterpart<'a>(child: Element<'a>, candidates: &[Candidate<'a>]) -> Counterpart<'a> {
    let recursive = child.recursive_description();
    if candidates
        .iter()
        .any(|c| c.element.recursive_description() == recursive)
    {
        return Counterpart::Identical;
    }

    let description = child.description();
    let same_text: Vec<Element<'a>> = candidates
        .iter()
        .filter(|c| c.description == description)
        .map(|c| c.element)
        .collect();
    if let Some(best) = closest_by_members(child, &same_text) {
        return Counterpart::Matched(best);
    }

    candidates
        .iter()
        .find(|c| child.is_diffable(&c.element))
        .map(|c| Counterpart::Matched(c.element))
        .unwrap_or(Counterpart::Missing)
}

/// Among nodes sharing `child`'s own text, pick the one sharing the most
/// identical members with it. The earliest wins on ties.
///
/// Distinct extensions of one type usually render identically, so member
/// overlap is what tells them apart.
fn closest_by_members<'a>(child: Element<'a>, same_text: &[Element<'a>]) -> Option<Element<'a>> {
    match same_text {
        [] => None,
        [only] => Some(*only),
        _ => {
            let members: HashSet<&str> = child
                .children()
                .map(|c| c.recursive_description())
                .collect();
            let mut best: Option<(usize, Element<'a>)> = None;
            for candidate in same_text {
                let overlap = candidate
                    .children()
                    .filter(|c| members.contains(c.recursive_description()))
                    .count();
                if best.map_or(true, |(score, _)| overlap > score) {
                    best = Some((overlap, *candidate));
                }
            }
            best.map(|(_, element)| element)
        }
    }
}
