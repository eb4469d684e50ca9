//! Bill of materials for a design.

use std::path::Path;

use df_bom::{BomReport, aggregate, export_json};

use crate::check_service::check_design;
use crate::error::AppResult;
use crate::snapshot::DesignSnapshot;

/// Validate the design, then aggregate everything the validation clears.
pub fn build_bom(design: &DesignSnapshot) -> BomReport {
    let book = check_design(design, false).status_book();
    aggregate(&design.entities, &book, design.prices.as_ref())
}

pub fn export_bom(path: &Path, report: &BomReport) -> AppResult<()> {
    export_json(path, report)?;
    tracing::debug!(path = %path.display(), lines = report.line_items.len(), "BOM exported");
    Ok(())
}
