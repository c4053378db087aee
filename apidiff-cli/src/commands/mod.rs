//! Command implementations for the apidiff CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod describe;
pub mod diff;

use std::path::Path;

use anyhow::Context;
use apidiff_core::types::InterfaceDump;

/// Read a declaration dump from disk.
pub(crate) async fn read_dump_text(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read declaration dump {}", path.display()))
}

/// Read and parse a declaration dump.
pub(crate) async fn load_dump(path: &Path) -> anyhow::Result<InterfaceDump> {
    let text = read_dump_text(path).await?;
    let dump = apidiff_core::parse_dump(&text)
        .with_context(|| format!("Invalid declaration dump {}", path.display()))?;
    tracing::debug!("Loaded {} units from {}", dump.units.len(), path.display());
    Ok(dump)
}
