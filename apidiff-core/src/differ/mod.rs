//! Diff engine for comparing declaration trees.
//!
//! Two versions of a unit are compared in two directional passes that emit
//! provisional addition and removal records. The consolidator then pairs
//! records denoting the same declaration into modifications with field-level
//! diffs, producing a sorted, deduplicated change list.
//!
//! # Features
//!
//! - **Content matching**: children are matched by text, not position
//! - **Fuzzy pairing**: signature changes surface as one modification
//! - **Parallel processing**: units are diffed concurrently via Rayon
//!
//! # Example
//!
//! ```
//! use apidiff_core::differ::diff_unit;
//! use apidiff_core::element::{Declaration, DeclarationTree};
//! use apidiff_core::types::FunctionDef;
//!
//! let mut old = DeclarationTree::new("MyLib");
//! old.add_child(old.root_id(), Declaration::Function(FunctionDef::named("fetch").returning("String")));
//! let mut new = DeclarationTree::new("MyLib");
//! new.add_child(new.root_id(), Declaration::Function(FunctionDef::named("fetch").returning("String?")));
//!
//! let changes = diff_unit(&old, &new);
//! assert_eq!(changes.len(), 1);
//! assert_eq!(changes[0].field_diffs, vec!["return type changed from `String` to `String?`"]);
//! ```

pub mod changes;
pub mod comparator;
pub mod consolidator;
pub mod units;

pub use changes::{
    ApiDiffReport, Change, ChangeKind, DiffSummary, IndependentChange, IndependentChangeKind,
    UnitReport,
};
pub use comparator::{compare, independent_changes};
pub use consolidator::consolidate;
pub use units::{diff_dumps, diff_unit, diff_units};
