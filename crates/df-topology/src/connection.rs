//! Connection points: the duct ends meeting at a junction.

use df_core::EntityId;
use df_model::{CrossSection, Material, PressureClass, ServiceId, Shape};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Snapshot of one duct or equipment end, taken when the junction is
/// classified. `direction` points away from the junction along the duct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPoint {
    pub position: Point2<f64>,
    pub direction: Vector2<f64>,
    pub section: CrossSection,
    pub owner: EntityId,
    pub material: Material,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_class: Option<PressureClass>,
}

impl ConnectionPoint {
    pub fn new(
        owner: EntityId,
        position: Point2<f64>,
        direction: Vector2<f64>,
        section: CrossSection,
        material: Material,
    ) -> Self {
        Self {
            position,
            direction,
            section,
            owner,
            material,
            service_id: None,
            pressure_class: None,
        }
    }

    pub fn with_service(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }

    pub fn with_pressure_class(mut self, pressure_class: PressureClass) -> Self {
        self.pressure_class = Some(pressure_class);
        self
    }

    pub fn shape(&self) -> Shape {
        self.section.shape()
    }

    pub fn area_sq_in(&self) -> f64 {
        self.section.area_sq_in()
    }

    /// Unit direction, or `None` for a zero-length or non-finite vector.
    pub fn unit_direction(&self) -> Option<Vector2<f64>> {
        let norm = self.direction.norm();
        if !norm.is_finite() || norm <= f64::EPSILON {
            return None;
        }
        Some(self.direction / norm)
    }
}

/// Angle between two direction vectors, degrees in [0, 180].
pub fn angle_between_deg(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    let cos = (a.dot(b) / (a.norm() * b.norm())).clamp(-1.0, 1.0);
    df_core::clamp_half_turn_deg(cos.acos().to_degrees())
}

/// How far the airstream turns passing from `a` into `b`.
///
/// Both vectors point away from the shared junction, so a straight run has
/// opposite vectors and zero deflection.
pub fn deflection_deg(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    180.0 - angle_between_deg(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_vectors_do_not_deflect() {
        let d = deflection_deg(&Vector2::new(1.0, 0.0), &Vector2::new(-3.0, 0.0));
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn perpendicular_vectors_deflect_ninety() {
        let d = deflection_deg(&Vector2::new(-1.0, 0.0), &Vector2::new(0.0, 2.0));
        assert!((d - 90.0).abs() < 1e-9);
    }

    #[test]
    fn zero_direction_has_no_unit() {
        let cp = ConnectionPoint::new(
            EntityId::from_index(0),
            Point2::origin(),
            Vector2::zeros(),
            CrossSection::round(8.0),
            Material::GalvanizedSteel,
        );
        assert!(cp.unit_direction().is_none());
    }

    #[test]
    fn coordinates_serialize_as_pairs() {
        let cp = ConnectionPoint::new(
            EntityId::from_index(2),
            Point2::new(1.5, -2.0),
            Vector2::new(0.0, 1.0),
            CrossSection::round(10.0),
            Material::BlackSteel,
        );
        let json = serde_json::to_value(&cp).unwrap();
        assert_eq!(json["position"], serde_json::json!([1.5, -2.0]));
        assert_eq!(json["direction"], serde_json::json!([0.0, 1.0]));
        assert_eq!(json["owner"], 3);

        let back: ConnectionPoint = serde_json::from_value(json).unwrap();
        assert_eq!(back, cp);
    }
}
