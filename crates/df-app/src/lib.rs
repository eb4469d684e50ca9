//! df-app: application service layer for ductflow.
//!
//! Provides a high-level API for:
//! - Loading, saving and validating design snapshots
//! - Checking every entity against its service and industrial constraints
//! - Resolving junctions into auto-inserted fittings
//! - Sizing ducts and suggesting alternatives
//! - Building and exporting the bill of materials
//!
//! This layer is what the CLI calls; it holds no state between calls.

pub mod bom_service;
pub mod check_service;
pub mod error;
pub mod resolve_service;
pub mod sizing_service;
pub mod snapshot;

pub use bom_service::{build_bom, export_bom};
pub use check_service::{CheckReport, check_design};
pub use error::{AppError, AppResult};
pub use resolve_service::{
    JunctionOutcome, JunctionStatus, ResolveReport, apply_resolution, junction_context,
    preview_junction, resolve_design, resolve_junction,
};
pub use sizing_service::{SizingWindow, size_duct, suggest_sizes};
pub use snapshot::{
    DesignSnapshot, JunctionDef, design_from_yaml_str, load_design, save_design, validate_design,
};
