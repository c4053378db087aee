//! Change types and result structures for declaration diffs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::element::{DeclarationKind, Element};

/// Kind of a provisional change record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IndependentChangeKind {
    Addition(String),
    Removal(String),
}

impl IndependentChangeKind {
    pub fn description(&self) -> &str {
        match self {
            IndependentChangeKind::Addition(d) | IndependentChangeKind::Removal(d) => d,
        }
    }

    pub fn is_addition(&self) -> bool {
        matches!(self, IndependentChangeKind::Addition(_))
    }
}

/// A provisional addition or removal, produced by one directional pass of the
/// comparator and consumed by the consolidator.
#[derive(Clone, Debug)]
pub struct IndependentChange<'a> {
    pub kind: IndependentChangeKind,
    pub element: Element<'a>,
    /// Which pass produced the record: `true` for old→new.
    pub old_first: bool,
}

impl<'a> IndependentChange<'a> {
    pub fn addition(description: String, element: Element<'a>, old_first: bool) -> Self {
        Self {
            kind: IndependentChangeKind::Addition(description),
            element,
            old_first,
        }
    }

    pub fn removal(description: String, element: Element<'a>, old_first: bool) -> Self {
        Self {
            kind: IndependentChangeKind::Removal(description),
            element,
            old_first,
        }
    }

    pub fn parent_path(&self) -> Option<String> {
        self.element.parent_path()
    }
}

/// Type of change detected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeKind {
    Addition {
        description: String,
    },
    Removal {
        description: String,
    },
    Modification {
        old_description: String,
        new_description: String,
    },
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Addition { .. } => "added",
            ChangeKind::Removal { .. } => "removed",
            ChangeKind::Modification { .. } => "modified",
        }
    }

    /// The description a reader sees first: the new text for additions and
    /// modifications, the old text for removals.
    pub fn primary_description(&self) -> &str {
        match self {
            ChangeKind::Addition { description } | ChangeKind::Removal { description } => {
                description
            }
            ChangeKind::Modification {
                new_description, ..
            } => new_description,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            ChangeKind::Addition { .. } => 0,
            ChangeKind::Modification { .. } => 1,
            ChangeKind::Removal { .. } => 2,
        }
    }
}

/// A single consolidated change, ready for reporting.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    #[serde(flatten)]
    pub kind: ChangeKind,

    /// Dotted path of the containing declaration; `None` only for the unit root.
    pub parent_path: Option<String>,

    /// Itemized field-level differences (modifications only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_diffs: Vec<String>,

    /// Kind of declaration that changed.
    pub declaration: DeclarationKind,
}

impl Change {
    pub fn addition(
        description: String,
        parent_path: Option<String>,
        declaration: DeclarationKind,
    ) -> Self {
        Self {
            kind: ChangeKind::Addition { description },
            parent_path,
            field_diffs: Vec::new(),
            declaration,
        }
    }

    pub fn removal(
        description: String,
        parent_path: Option<String>,
        declaration: DeclarationKind,
    ) -> Self {
        Self {
            kind: ChangeKind::Removal { description },
            parent_path,
            field_diffs: Vec::new(),
            declaration,
        }
    }

    pub fn modification(
        old_description: String,
        new_description: String,
        parent_path: Option<String>,
        declaration: DeclarationKind,
    ) -> Self {
        Self {
            kind: ChangeKind::Modification {
                old_description,
                new_description,
            },
            parent_path,
            field_diffs: Vec::new(),
            declaration,
        }
    }

    /// Set field diffs, sorted.
    pub fn with_field_diffs(mut self, mut field_diffs: Vec<String>) -> Self {
        field_diffs.sort();
        self.field_diffs = field_diffs;
        self
    }

    pub fn is_modification(&self) -> bool {
        matches!(self.kind, ChangeKind::Modification { .. })
    }

    /// Key giving the report order: parent path, description, then added
    /// before modified before removed.
    pub(crate) fn sort_key(&self) -> (Option<&str>, &str, u8, &str, DeclarationKind, &[String]) {
        let secondary = match &self.kind {
            ChangeKind::Modification {
                old_description, ..
            } => old_description.as_str(),
            _ => "",
        };
        (
            self.parent_path.as_deref(),
            self.kind.primary_description(),
            self.kind.rank(),
            secondary,
            self.declaration,
            &self.field_diffs,
        )
    }
}

/// Summary statistics for a diff.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub additions: u32,
    pub removals: u32,
    pub modifications: u32,
}

impl DiffSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_changes(changes: &[Change]) -> Self {
        let mut summary = Self::new();
        for change in changes {
            summary.record(&change.kind);
        }
        summary
    }

    /// Increment the counter for `kind`.
    pub fn record(&mut self, kind: &ChangeKind) {
        match kind {
            ChangeKind::Addition { .. } => self.additions += 1,
            ChangeKind::Removal { .. } => self.removals += 1,
            ChangeKind::Modification { .. } => self.modifications += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.additions + self.removals + self.modifications
    }

    /// Merge another summary into this one.
    pub fn merge(&mut self, other: &DiffSummary) {
        self.additions += other.additions;
        self.removals += other.removals;
        self.modifications += other.modifications;
    }

    /// Generate human-readable summary string.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        if self.additions > 0 {
            parts.push(format!("{} added", self.additions));
        }
        if self.modifications > 0 {
            parts.push(format!("{} modified", self.modifications));
        }
        if self.removals > 0 {
            parts.push(format!("{} removed", self.removals));
        }

        if parts.is_empty() {
            "No changes".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Changes for one comparable unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitReport {
    pub changes: Vec<Change>,

    /// Unit-level notes collected alongside the changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    pub summary: DiffSummary,
}

impl UnitReport {
    pub fn new(changes: Vec<Change>) -> Self {
        let summary = DiffSummary::from_changes(&changes);
        Self {
            changes,
            warnings: Vec::new(),
            summary,
        }
    }

    pub fn with_warning(mut self, warning: String) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Complete result of diffing every unit of two declaration dumps.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiDiffReport {
    /// Per-unit results, keyed and ordered by unit name.
    pub units: BTreeMap<String, UnitReport>,

    /// Summary across all units.
    pub summary: DiffSummary,

    /// Human-readable summary text
    pub summary_text: String,

    /// Duration of diff operation in milliseconds
    pub duration_ms: f64,
}

impl ApiDiffReport {
    pub fn new(units: BTreeMap<String, UnitReport>) -> Self {
        let mut summary = DiffSummary::new();
        for unit in units.values() {
            summary.merge(&unit.summary);
        }
        Self {
            units,
            summary,
            summary_text: String::new(),
            duration_ms: 0.0,
        }
    }

    /// Finalize the result with timing and summary text.
    pub fn finalize(&mut self, duration_ms: f64) {
        self.duration_ms = duration_ms;
        self.summary_text = self.summary.text();
    }

    pub fn has_changes(&self) -> bool {
        self.units.values().any(UnitReport::has_changes)
    }

    pub fn change_count(&self) -> usize {
        self.units.values().map(|u| u.changes.len()).sum()
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.units.keys().map(String::as_str).collect()
    }

    pub fn unit(&self, name: &str) -> Option<&UnitReport> {
        self.units.get(name)
    }
}
