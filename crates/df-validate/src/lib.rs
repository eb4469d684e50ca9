//! df-validate: engineering validation of ducts, fittings and equipment.
//!
//! Produces a [`ConstraintStatus`] per entity. Violations are data, never
//! errors: an `error` violation keeps that entity out of export, warnings
//! and infos never block anything.

mod checks;
pub mod engine;
pub mod status;

pub use engine::{validate, validate_all, validate_all_par, validate_with};
pub use status::{ConstraintStatus, SeverityGroups, StatusBook, ValidationState};
