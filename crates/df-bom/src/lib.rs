//! df-bom: bill of materials from validated entities.

pub mod aggregate;
pub mod hash;
pub mod types;

pub use aggregate::aggregate;
pub use hash::compute_fingerprint;
pub use types::*;

use std::path::Path;

pub type BomResult<T> = Result<T, BomError>;

#[derive(thiserror::Error, Debug)]
pub enum BomError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the report as pretty-printed JSON.
pub fn export_json(path: &Path, report: &BomReport) -> BomResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_json(path: &Path) -> BomResult<BomReport> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
