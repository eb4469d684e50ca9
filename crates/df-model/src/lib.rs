//! df-model: constraint/service model and entity snapshots for ductflow.

pub mod constraints;
pub mod entity;
pub mod fitting;
pub mod material;
pub mod profile;
pub mod service;
pub mod shape;
pub mod validate;
pub mod violation;

pub use constraints::{
    AirCoefficients, DesignConstraints, DimensionLimits, FittingPolicy, IndustrialConstraints,
    STANDARD_AIR_DENSITY, SizingConstraints,
};
pub use entity::{DuctEntity, Entity, EquipmentEntity, EquipmentKind, FittingEntity};
pub use fitting::{Alignment, FittingRequest, FittingType};
pub use material::{Material, PressureClass};
pub use profile::{ConstraintProfile, LATEST_VERSION};
pub use service::{FittingRules, ForbiddenFitting, ServiceDef, ServiceId};
pub use shape::{CrossSection, Shape, ShapeSignature};
pub use validate::{ConfigError, validate_profile};
pub use violation::{Severity, SuggestedFix, Violation, ViolationKind};

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn profile_from_yaml_str(content: &str) -> ModelResult<ConstraintProfile> {
    let profile: ConstraintProfile = serde_yaml::from_str(content)?;
    validate_profile(&profile)?;
    Ok(profile)
}

pub fn load_yaml(path: &std::path::Path) -> ModelResult<ConstraintProfile> {
    let content = std::fs::read_to_string(path)?;
    profile_from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, profile: &ConstraintProfile) -> ModelResult<()> {
    validate_profile(profile)?;
    let content = serde_yaml::to_string(profile)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ModelResult<ConstraintProfile> {
    let content = std::fs::read_to_string(path)?;
    let profile: ConstraintProfile = serde_json::from_str(&content)?;
    validate_profile(&profile)?;
    Ok(profile)
}

pub fn save_json(path: &std::path::Path, profile: &ConstraintProfile) -> ModelResult<()> {
    validate_profile(profile)?;
    let content = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, content)?;
    Ok(())
}
