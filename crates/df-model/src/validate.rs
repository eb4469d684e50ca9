//! Structural validation of constraint profiles.
//!
//! This only rejects configuration that cannot be used at all (duplicate
//! ids, inverted velocity windows, non-positive coefficients). Design
//! problems are reported by the validation engine as violations instead.

use std::collections::HashSet;

use crate::constraints::{AirCoefficients, DimensionLimits, FittingPolicy, SizingConstraints};
use crate::profile::{ConstraintProfile, LATEST_VERSION};
use crate::service::ServiceDef;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_profile(profile: &ConstraintProfile) -> Result<(), ConfigError> {
    if profile.version > LATEST_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            version: profile.version,
        });
    }

    let mut service_ids = HashSet::new();
    for service in &profile.services {
        if !service_ids.insert(&service.id) {
            return Err(ConfigError::DuplicateId {
                id: service.id.to_string(),
                context: "services".to_string(),
            });
        }
        validate_service(service)?;
    }

    if let Some(industrial) = &profile.industrial {
        if let Some(sizing) = &industrial.sizing {
            validate_sizing_constraints(sizing, "industrial sizing")?;
        }
        validate_dimension_limits(&industrial.dimensions)?;
        validate_fitting_policy(&industrial.fitting_policy)?;
    }

    validate_coefficients(&profile.coefficients)
}

pub fn validate_service(service: &ServiceDef) -> Result<(), ConfigError> {
    if let Some(sizing) = &service.sizing {
        validate_sizing_constraints(sizing, &format!("service '{}' sizing", service.id))?;
    }
    Ok(())
}

pub fn validate_sizing_constraints(
    sizing: &SizingConstraints,
    context: &str,
) -> Result<(), ConfigError> {
    validate_positive_finite(context, "max_velocity_fpm", sizing.max_velocity_fpm)?;
    validate_positive_finite(context, "min_velocity_fpm", sizing.min_velocity_fpm)?;
    validate_positive_finite(context, "target_friction", sizing.target_friction)?;
    if sizing.min_velocity_fpm > sizing.max_velocity_fpm {
        return Err(ConfigError::InvalidValue {
            field: format!("{context} min_velocity_fpm"),
            value: sizing.min_velocity_fpm.to_string(),
            reason: format!("must not exceed max_velocity_fpm ({})", sizing.max_velocity_fpm),
        });
    }
    Ok(())
}

fn validate_dimension_limits(limits: &DimensionLimits) -> Result<(), ConfigError> {
    let context = "industrial dimensions";
    validate_positive_finite(context, "min_size_in", limits.min_size_in)?;
    validate_positive_finite(context, "max_size_in", limits.max_size_in)?;
    if limits.min_size_in > limits.max_size_in {
        return Err(ConfigError::InvalidValue {
            field: format!("{context} min_size_in"),
            value: limits.min_size_in.to_string(),
            reason: format!("must not exceed max_size_in ({})", limits.max_size_in),
        });
    }
    if !limits.max_aspect_ratio.is_finite() || limits.max_aspect_ratio < 1.0 {
        return Err(ConfigError::InvalidValue {
            field: format!("{context} max_aspect_ratio"),
            value: limits.max_aspect_ratio.to_string(),
            reason: "must be finite and at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_fitting_policy(policy: &FittingPolicy) -> Result<(), ConfigError> {
    let context = "fitting_policy";
    validate_positive_finite(context, "concentric_slope", policy.concentric_slope)?;
    validate_positive_finite(context, "eccentric_slope", policy.eccentric_slope)?;
    validate_positive_finite(
        context,
        "min_transition_length_in",
        policy.min_transition_length_in,
    )?;
    validate_non_negative_finite(
        context,
        "elbow_match_tolerance_deg",
        policy.elbow_match_tolerance_deg,
    )?;
    if !policy.max_elbow_angle_deg.is_finite()
        || policy.max_elbow_angle_deg <= 0.0
        || policy.max_elbow_angle_deg > 180.0
    {
        return Err(ConfigError::InvalidValue {
            field: format!("{context} max_elbow_angle_deg"),
            value: policy.max_elbow_angle_deg.to_string(),
            reason: "must be in (0, 180]".to_string(),
        });
    }
    if !policy.wye_threshold_deg.is_finite()
        || policy.wye_threshold_deg < 0.0
        || policy.wye_threshold_deg > 180.0
    {
        return Err(ConfigError::InvalidValue {
            field: format!("{context} wye_threshold_deg"),
            value: policy.wye_threshold_deg.to_string(),
            reason: "must be in [0, 180]".to_string(),
        });
    }
    Ok(())
}

fn validate_coefficients(coefficients: &AirCoefficients) -> Result<(), ConfigError> {
    let context = "coefficients";
    validate_positive_finite(context, "friction_factor", coefficients.friction_factor)?;
    validate_positive_finite(context, "air_density", coefficients.air_density)?;
    validate_positive_finite(
        context,
        "velocity_pressure_constant",
        coefficients.velocity_pressure_constant,
    )
}

fn validate_positive_finite(context: &str, field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field: format!("{context} {field}"),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn validate_non_negative_finite(context: &str, field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field: format!("{context} {field}"),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::IndustrialConstraints;

    fn profile() -> ConstraintProfile {
        ConstraintProfile {
            version: LATEST_VERSION,
            name: "test".into(),
            services: vec![ServiceDef::new("supply", "Supply")],
            industrial: Some(IndustrialConstraints::default()),
            coefficients: AirCoefficients::default(),
        }
    }

    #[test]
    fn default_profile_is_valid() {
        assert!(validate_profile(&profile()).is_ok());
    }

    #[test]
    fn duplicate_service_rejected() {
        let mut p = profile();
        p.services.push(ServiceDef::new("supply", "Supply again"));
        assert!(matches!(
            validate_profile(&p),
            Err(ConfigError::DuplicateId { .. })
        ));
    }

    #[test]
    fn inverted_velocity_window_rejected() {
        let mut p = profile();
        p.services[0].sizing = Some(SizingConstraints::new(2000.0, 1000.0));
        let err = validate_profile(&p).unwrap_err();
        assert!(err.to_string().contains("min_velocity_fpm"));
    }

    #[test]
    fn future_version_rejected() {
        let mut p = profile();
        p.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_profile(&p),
            Err(ConfigError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn zero_density_rejected() {
        let mut p = profile();
        p.coefficients.air_density = 0.0;
        assert!(validate_profile(&p).is_err());
    }
}
