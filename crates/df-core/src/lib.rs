//! df-core: stable foundation for ductflow.
//!
//! Contains:
//! - units (uom imperial constructors and conversions used by duct math)
//! - numeric (Real + tolerances + angle helpers)
//! - ids (compact entity IDs shared by the model, validation and BOM layers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{DfError, DfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
