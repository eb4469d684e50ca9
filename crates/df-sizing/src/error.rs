//! Sizing errors.
//!
//! Every variant is a caller contract violation: the inputs cannot describe a
//! duct at all. They are never clamped or replaced with defaults.

use df_core::DfError;
use thiserror::Error;

pub type SizingResult<T> = Result<T, SizingError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("Sizing infeasible: airflow must be positive and finite, got {airflow_cfm} CFM")]
    NonPositiveAirflow { airflow_cfm: f64 },

    #[error(
        "Sizing infeasible: minimum velocity {min_velocity_fpm} FPM exceeds maximum {max_velocity_fpm} FPM"
    )]
    InvertedVelocityWindow {
        min_velocity_fpm: f64,
        max_velocity_fpm: f64,
    },

    #[error("Sizing infeasible: {what} must be positive and finite, got {value}")]
    InvalidParameter { what: &'static str, value: f64 },
}

impl From<SizingError> for DfError {
    fn from(err: SizingError) -> Self {
        DfError::InvalidArg {
            what: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_carries_values() {
        let err = SizingError::InvertedVelocityWindow {
            min_velocity_fpm: 1200.0,
            max_velocity_fpm: 900.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("1200"));
        assert!(msg.contains("900"));
    }

    #[test]
    fn error_to_df_error() {
        let err: DfError = SizingError::NonPositiveAirflow { airflow_cfm: 0.0 }.into();
        assert!(matches!(err, DfError::InvalidArg { .. }));
    }
}
