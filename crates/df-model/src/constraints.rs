//! Engineering limits and policy knobs supplied per service or per
//! industrial profile.

use serde::{Deserialize, Serialize};

use crate::fitting::Alignment;
use crate::service::ServiceDef;

/// Velocity window and friction target for auto-sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingConstraints {
    pub max_velocity_fpm: f64,
    pub min_velocity_fpm: f64,
    /// Target friction rate, in. w.g. per 100 ft.
    #[serde(default = "default_target_friction")]
    pub target_friction: f64,
}

fn default_target_friction() -> f64 {
    0.08
}

impl SizingConstraints {
    pub fn new(min_velocity_fpm: f64, max_velocity_fpm: f64) -> Self {
        Self {
            max_velocity_fpm,
            min_velocity_fpm,
            target_friction: default_target_friction(),
        }
    }

    pub fn with_target_friction(mut self, target_friction: f64) -> Self {
        self.target_friction = target_friction;
        self
    }
}

/// Duct size limits in inches, checked against the governing dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionLimits {
    pub min_size_in: f64,
    pub max_size_in: f64,
    pub max_aspect_ratio: f64,
}

impl Default for DimensionLimits {
    fn default() -> Self {
        Self {
            min_size_in: 4.0,
            max_size_in: 96.0,
            max_aspect_ratio: 4.0,
        }
    }
}

/// Knobs the fitting strategies read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FittingPolicy {
    /// Axial length per inch of offset for concentric transitions.
    pub concentric_slope: f64,
    /// Axial length per inch of offset when one wall carries the whole offset.
    pub eccentric_slope: f64,
    pub min_transition_length_in: f64,
    /// Alignment used whenever a transition drops (vertical extents differ).
    pub eccentric_alignment: Alignment,
    /// How far from 90/45 a turn may be and still use a standard elbow.
    pub elbow_match_tolerance_deg: f64,
    /// Largest deflection a single elbow can realize.
    pub max_elbow_angle_deg: f64,
    /// Branch angle (measured between primary run and branch) above which a
    /// wye is used instead of a tee.
    pub wye_threshold_deg: f64,
    pub prefer_long_radius: bool,
}

impl Default for FittingPolicy {
    fn default() -> Self {
        Self {
            concentric_slope: 2.0,
            eccentric_slope: 4.0,
            min_transition_length_in: 6.0,
            eccentric_alignment: Alignment::FlatBottom,
            elbow_match_tolerance_deg: 2.5,
            max_elbow_angle_deg: 90.0,
            wye_threshold_deg: 112.5,
            prefer_long_radius: true,
        }
    }
}

/// Site- or project-wide engineering profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndustrialConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingConstraints>,
    #[serde(default)]
    pub dimensions: DimensionLimits,
    #[serde(default)]
    pub fitting_policy: FittingPolicy,
}

/// Constraints governing one junction or one entity. Either half may be
/// absent, meaning "unconstrained".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industrial: Option<IndustrialConstraints>,
}

impl DesignConstraints {
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, service: ServiceDef) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_industrial(mut self, industrial: IndustrialConstraints) -> Self {
        self.industrial = Some(industrial);
        self
    }

    pub fn fitting_policy(&self) -> FittingPolicy {
        self.industrial
            .as_ref()
            .map(|i| i.fitting_policy)
            .unwrap_or_default()
    }

    /// Service sizing wins over the industrial profile.
    pub fn sizing(&self) -> Option<&SizingConstraints> {
        self.service
            .as_ref()
            .and_then(|s| s.sizing.as_ref())
            .or_else(|| self.industrial.as_ref().and_then(|i| i.sizing.as_ref()))
    }

    pub fn dimension_limits(&self) -> Option<&DimensionLimits> {
        self.industrial.as_ref().map(|i| &i.dimensions)
    }
}

/// Air and friction coefficients used by the pressure-drop model.
///
/// Defaults describe standard air (70 °F, sea level). Use [`AirCoefficients::at_site`]
/// for elevation and temperature corrections instead of editing constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirCoefficients {
    pub friction_factor: f64,
    /// lb/ft³
    pub air_density: f64,
    /// FPM at which velocity pressure equals 1 in. w.g. for standard air.
    pub velocity_pressure_constant: f64,
}

pub const STANDARD_AIR_DENSITY: f64 = 0.075;
const STANDARD_TEMPERATURE_R: f64 = 530.0;

impl Default for AirCoefficients {
    fn default() -> Self {
        Self {
            friction_factor: 0.02,
            air_density: STANDARD_AIR_DENSITY,
            velocity_pressure_constant: 4005.0,
        }
    }
}

impl AirCoefficients {
    /// Standard-atmosphere density correction for elevation (ft) and dry-bulb
    /// temperature (°F).
    pub fn at_site(elevation_ft: f64, temperature_f: f64) -> Self {
        let altitude_ratio = (1.0 - 6.8754e-6 * elevation_ft).powf(5.2559);
        let temperature_ratio = STANDARD_TEMPERATURE_R / (temperature_f + 460.0);
        Self {
            air_density: STANDARD_AIR_DENSITY * altitude_ratio * temperature_ratio,
            ..Self::default()
        }
    }

    pub fn density_ratio(&self) -> f64 {
        self.air_density / STANDARD_AIR_DENSITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceDef;

    #[test]
    fn service_sizing_overrides_industrial() {
        let mut svc = ServiceDef::new("supply", "Supply");
        svc.sizing = Some(SizingConstraints::new(600.0, 1500.0));
        let industrial = IndustrialConstraints {
            sizing: Some(SizingConstraints::new(400.0, 2500.0)),
            ..Default::default()
        };
        let c = DesignConstraints::unconstrained()
            .with_service(svc)
            .with_industrial(industrial.clone());
        assert_eq!(c.sizing().unwrap().max_velocity_fpm, 1500.0);

        let c = DesignConstraints::unconstrained().with_industrial(industrial);
        assert_eq!(c.sizing().unwrap().max_velocity_fpm, 2500.0);
        assert!(DesignConstraints::unconstrained().sizing().is_none());
    }

    #[test]
    fn policy_defaults_without_industrial_profile() {
        let p = DesignConstraints::unconstrained().fitting_policy();
        assert_eq!(p.concentric_slope, 2.0);
        assert_eq!(p.eccentric_alignment, Alignment::FlatBottom);
    }

    #[test]
    fn standard_site_is_standard_air() {
        let c = AirCoefficients::at_site(0.0, 70.0);
        assert!((c.air_density - STANDARD_AIR_DENSITY).abs() < 1e-12);
    }

    #[test]
    fn denver_air_is_thinner() {
        let c = AirCoefficients::at_site(5280.0, 70.0);
        assert!(c.density_ratio() < 0.85 && c.density_ratio() > 0.80);
    }

    #[test]
    fn partial_policy_yaml_uses_defaults() {
        let p: FittingPolicy = serde_yaml::from_str("wye_threshold_deg: 120.0\n").unwrap();
        assert_eq!(p.wye_threshold_deg, 120.0);
        assert_eq!(p.max_elbow_angle_deg, 90.0);
    }
}
