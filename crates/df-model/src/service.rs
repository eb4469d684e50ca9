//! Services (named airflow circuits) and their fitting legality rules.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::constraints::SizingConstraints;
use crate::fitting::FittingType;
use crate::material::{Material, PressureClass};
use crate::shape::Shape;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named airflow circuit, e.g. "Supply" or "Grease exhaust".
///
/// Empty `allowed_shapes` / `allowed_materials` lists mean "any".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDef {
    pub id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub allowed_shapes: Vec<Shape>,
    #[serde(default)]
    pub allowed_materials: Vec<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_class: Option<PressureClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingConstraints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitting_rules: Option<FittingRules>,
}

impl ServiceDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ServiceId::new(id),
            name: name.into(),
            allowed_shapes: Vec::new(),
            allowed_materials: Vec::new(),
            pressure_class: None,
            sizing: None,
            fitting_rules: None,
        }
    }

    pub fn allows_shape(&self, shape: Shape) -> bool {
        self.allowed_shapes.is_empty() || self.allowed_shapes.contains(&shape)
    }

    pub fn allows_material(&self, material: Material) -> bool {
        self.allowed_materials.is_empty() || self.allowed_materials.contains(&material)
    }

    /// `Err(reason)` when the service's fitting rules reject `fitting_type`.
    pub fn check_fitting(&self, fitting_type: FittingType) -> Result<(), String> {
        match &self.fitting_rules {
            Some(rules) => rules.check(fitting_type),
            None => Ok(()),
        }
    }
}

/// Fitting legality for one service.
///
/// `allowed` is a whitelist when present; `forbidden` entries always win and
/// carry the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FittingRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<FittingType>>,
    #[serde(default)]
    pub forbidden: Vec<ForbiddenFitting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForbiddenFitting {
    pub fitting_type: FittingType,
    pub reason: String,
}

impl FittingRules {
    pub fn forbid(mut self, fitting_type: FittingType, reason: impl Into<String>) -> Self {
        self.forbidden.push(ForbiddenFitting {
            fitting_type,
            reason: reason.into(),
        });
        self
    }

    pub fn only(mut self, allowed: impl IntoIterator<Item = FittingType>) -> Self {
        self.allowed = Some(allowed.into_iter().collect());
        self
    }

    pub fn permits(&self, fitting_type: FittingType) -> bool {
        self.check(fitting_type).is_ok()
    }

    pub fn check(&self, fitting_type: FittingType) -> Result<(), String> {
        if let Some(rule) = self
            .forbidden
            .iter()
            .find(|r| r.fitting_type == fitting_type)
        {
            return Err(rule.reason.clone());
        }
        if let Some(allowed) = &self.allowed
            && !allowed.contains(&fitting_type)
        {
            return Err(format!("{fitting_type} is not on the service's allowed list"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_allow_everything() {
        let svc = ServiceDef::new("supply", "Supply");
        assert!(svc.allows_shape(Shape::Rectangular));
        assert!(svc.allows_material(Material::Pvc));
        assert!(svc.check_fitting(FittingType::MiteredElbow).is_ok());
    }

    #[test]
    fn forbidden_beats_allowed() {
        let rules = FittingRules::default()
            .only([FittingType::Elbow90LongRadius, FittingType::Wye])
            .forbid(FittingType::Wye, "no wyes on this riser");
        assert!(rules.permits(FittingType::Elbow90LongRadius));
        assert_eq!(
            rules.check(FittingType::Wye).unwrap_err(),
            "no wyes on this riser"
        );
        let err = rules.check(FittingType::Tee).unwrap_err();
        assert!(err.contains("Tee"));
    }

    #[test]
    fn service_yaml() {
        let yaml = r#"
id: grease
name: Grease exhaust
allowed_shapes: [round]
allowed_materials: [black_steel, stainless_steel]
pressure_class: "4in"
fitting_rules:
  forbidden:
    - fitting_type: mitered_elbow
      reason: grease traps in mitered seams
"#;
        let svc: ServiceDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(svc.id.as_str(), "grease");
        assert!(!svc.allows_shape(Shape::Rectangular));
        assert!(!svc.allows_material(Material::GalvanizedSteel));
        assert!(svc.check_fitting(FittingType::MiteredElbow).is_err());
        assert_eq!(svc.pressure_class, Some(PressureClass::FourInch));
    }
}
