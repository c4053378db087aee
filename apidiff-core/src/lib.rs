//! apidiff core - semantic diffing of public API declaration surfaces.
//!
//! This crate compares two versions of a library's public declarations
//! (types, functions, variables, extensions, ...) and produces a grouped,
//! human-readable changelog.
//!
//! # Features
//!
//! - **Declaration trees**: an arena of declaration nodes with stable textual rendering
//! - **Two-pass diffing**: additions, removals and fuzzy-matched modifications
//! - **Field-level diffs**: itemized changes to attributes, parameters, return types
//! - **Parallel processing**: units are diffed concurrently using Rayon
//! - **Multiple export formats**: JSON, Markdown
//!
//! # Usage
//!
//! ```
//! use apidiff_core::{diff_dumps, loader};
//!
//! let old = loader::parse_dump(r#"{ "units": [ { "name": "MyLib", "declarations": [
//!     { "kind": "struct", "name": "A", "modifiers": ["public"] } ] } ] }"#)?;
//! let new = loader::parse_dump(r#"{ "units": [ { "name": "MyLib", "declarations": [
//!     { "kind": "struct", "name": "B", "modifiers": ["public"] } ] } ] }"#)?;
//!
//! let report = diff_dumps(&old, &new)?;
//! assert_eq!(report.change_count(), 2);
//! # Ok::<(), apidiff_core::ApiDiffError>(())
//! ```

pub mod differ;
pub mod element;
pub mod error;
pub mod exporter;
pub mod loader;
pub mod types;

pub use differ::{
    diff_dumps, diff_unit, diff_units, ApiDiffReport, Change, ChangeKind, DiffSummary, UnitReport,
};
pub use element::{Declaration, DeclarationKind, DeclarationTree, Element, NodeId};
pub use error::{ApiDiffError, Result};
pub use exporter::ExportConfig;
pub use loader::{load_unit, parse_dump};

/// Get the version of apidiff-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
