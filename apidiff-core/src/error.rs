//! Error types for apidiff-core.

use thiserror::Error;

/// Result type alias for apidiff-core operations.
pub type Result<T> = std::result::Result<T, ApiDiffError>;

/// Errors that can occur while loading declaration dumps.
///
/// Diffing itself never fails; these cover the boundary where dumps are
/// read and turned into declaration trees.
#[derive(Error, Debug)]
pub enum ApiDiffError {
    /// The dump has no unit with the requested name.
    #[error("Unit not found: {name}")]
    UnitNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// A declaration in the dump is missing required data.
    #[error("Invalid declaration: {message}")]
    InvalidDeclaration {
        /// Description of the problem, including where it occurred.
        message: String,
    },

    /// The dump is not valid JSON or does not match the dump schema.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}
