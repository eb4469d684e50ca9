//! Constraint profile: the service catalog plus the industrial profile and
//! air coefficients for one site.

use serde::{Deserialize, Serialize};

use crate::constraints::{AirCoefficients, DesignConstraints, IndustrialConstraints};
use crate::service::{ServiceDef, ServiceId};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintProfile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub services: Vec<ServiceDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industrial: Option<IndustrialConstraints>,
    #[serde(default)]
    pub coefficients: AirCoefficients,
}

impl Default for ConstraintProfile {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: String::new(),
            services: Vec::new(),
            industrial: None,
            coefficients: AirCoefficients::default(),
        }
    }
}

impl ConstraintProfile {
    pub fn service(&self, id: &ServiceId) -> Option<&ServiceDef> {
        self.services.iter().find(|s| &s.id == id)
    }

    /// Constraints for something on `service_id`. An unknown or absent
    /// service leaves the service half unconstrained.
    pub fn constraints_for(&self, service_id: Option<&ServiceId>) -> DesignConstraints {
        DesignConstraints {
            service: service_id.and_then(|id| self.service(id)).cloned(),
            industrial: self.industrial.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraints_for_unknown_service_keep_industrial() {
        let profile = ConstraintProfile {
            services: vec![ServiceDef::new("supply", "Supply")],
            industrial: Some(IndustrialConstraints::default()),
            ..Default::default()
        };
        let c = profile.constraints_for(Some(&ServiceId::from("return")));
        assert!(c.service.is_none());
        assert!(c.industrial.is_some());

        let c = profile.constraints_for(Some(&ServiceId::from("supply")));
        assert_eq!(c.service.unwrap().name, "Supply");
    }
}
