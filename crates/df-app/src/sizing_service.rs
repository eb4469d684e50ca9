//! Auto-sizing and size suggestions for the CLI.

use df_model::{AirCoefficients, ConstraintProfile, ServiceId, Shape, SizingConstraints};
use df_sizing::{
    DEFAULT_ASPECT_RATIO, DuctSizingResult, SizingOption, calculate_duct_size, suggest_duct_sizes,
};

use crate::error::{AppError, AppResult};

/// Where the velocity window comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingWindow {
    /// Explicit limits, FPM.
    Explicit { min_fpm: f64, max_fpm: f64 },
    /// A service's window, falling back to the industrial one.
    Service(ServiceId),
    /// The profile's industrial window.
    Industrial,
}

impl SizingWindow {
    /// Build from optional CLI arguments. Explicit limits must come in pairs
    /// and win over a service.
    pub fn from_args(
        service: Option<&str>,
        min_fpm: Option<f64>,
        max_fpm: Option<f64>,
    ) -> AppResult<Self> {
        match (min_fpm, max_fpm) {
            (Some(min_fpm), Some(max_fpm)) => Ok(SizingWindow::Explicit { min_fpm, max_fpm }),
            (None, None) => Ok(service
                .map(|s| SizingWindow::Service(ServiceId::new(s)))
                .unwrap_or(SizingWindow::Industrial)),
            _ => Err(AppError::InvalidInput(
                "minimum and maximum velocity must be given together".to_string(),
            )),
        }
    }

    pub fn resolve(&self, profile: &ConstraintProfile) -> AppResult<SizingConstraints> {
        match self {
            SizingWindow::Explicit { min_fpm, max_fpm } => {
                Ok(SizingConstraints::new(*min_fpm, *max_fpm))
            }
            SizingWindow::Service(id) => {
                if profile.service(id).is_none() {
                    return Err(AppError::ServiceNotFound(id.to_string()));
                }
                profile
                    .constraints_for(Some(id))
                    .sizing()
                    .copied()
                    .ok_or_else(|| {
                        AppError::InvalidInput(format!(
                            "service '{}' has no velocity window and the profile sets none",
                            id
                        ))
                    })
            }
            SizingWindow::Industrial => profile
                .industrial
                .as_ref()
                .and_then(|i| i.sizing)
                .ok_or_else(|| {
                    AppError::InvalidInput(
                        "no velocity window: pass limits or pick a service".to_string(),
                    )
                }),
        }
    }
}

pub fn size_duct(
    airflow_cfm: f64,
    window: &SizingConstraints,
    shape: Shape,
    aspect_ratio: Option<f64>,
    coefficients: &AirCoefficients,
) -> AppResult<DuctSizingResult> {
    let result = calculate_duct_size(
        airflow_cfm,
        window,
        shape,
        aspect_ratio.unwrap_or(DEFAULT_ASPECT_RATIO),
        coefficients,
    )?;
    tracing::debug!(
        airflow_cfm,
        velocity_fpm = result.velocity_fpm,
        area_sq_ft = result.area_sq_ft,
        "duct sized"
    );
    Ok(result)
}

pub fn suggest_sizes(
    airflow_cfm: f64,
    window: &SizingConstraints,
    shape: Shape,
    coefficients: &AirCoefficients,
) -> AppResult<Vec<SizingOption>> {
    Ok(suggest_duct_sizes(airflow_cfm, shape, window, coefficients)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_model::{IndustrialConstraints, ServiceDef};

    fn profile() -> ConstraintProfile {
        let mut supply = ServiceDef::new("supply", "Supply");
        supply.sizing = Some(SizingConstraints::new(400.0, 1200.0));
        ConstraintProfile {
            services: vec![supply, ServiceDef::new("return", "Return")],
            industrial: Some(IndustrialConstraints {
                sizing: Some(SizingConstraints::new(300.0, 1500.0)),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_limits_win() {
        let w = SizingWindow::from_args(Some("supply"), Some(500.0), Some(900.0)).unwrap();
        let c = w.resolve(&profile()).unwrap();
        assert_eq!(c.min_velocity_fpm, 500.0);
        assert_eq!(c.max_velocity_fpm, 900.0);
    }

    #[test]
    fn half_a_window_is_rejected() {
        let err = SizingWindow::from_args(None, Some(500.0), None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn service_without_window_uses_industrial() {
        let w = SizingWindow::from_args(Some("return"), None, None).unwrap();
        let c = w.resolve(&profile()).unwrap();
        assert_eq!(c.max_velocity_fpm, 1500.0);
    }

    #[test]
    fn unknown_service_is_reported() {
        let w = SizingWindow::Service(ServiceId::new("grease"));
        assert!(matches!(
            w.resolve(&profile()),
            Err(AppError::ServiceNotFound(_))
        ));
    }

    #[test]
    fn no_window_anywhere_is_invalid_input() {
        let w = SizingWindow::Industrial;
        assert!(w.resolve(&ConstraintProfile::default()).is_err());
    }

    #[test]
    fn sizes_at_max_velocity() {
        let window = SizingConstraints::new(400.0, 1000.0);
        let r = size_duct(2000.0, &window, Shape::Round, None, &AirCoefficients::default())
            .unwrap();
        assert!((r.area_sq_ft - 2.0).abs() < 1e-9);
    }

    #[test]
    fn infeasible_window_surfaces_as_sizing_error() {
        let window = SizingConstraints::new(1200.0, 400.0);
        let err = suggest_sizes(800.0, &window, Shape::Round, &AirCoefficients::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Sizing(_)));
    }
}
