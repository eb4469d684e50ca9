//! Snapshots of the entities the validation engine and BOM aggregator read.
//!
//! The entity store is external; these are plain values handed in by the host.

use df_core::EntityId;
use serde::{Deserialize, Serialize};

use crate::fitting::{FittingRequest, FittingType};
use crate::material::{Material, PressureClass};
use crate::service::ServiceId;
use crate::shape::CrossSection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuctEntity {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    pub section: CrossSection,
    pub material: Material,
    pub length_ft: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_cfm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_class: Option<PressureClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingEntity {
    pub id: EntityId,
    pub fitting_type: FittingType,
    pub section: CrossSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlet: Option<CrossSection>,
    pub material: Material,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_in: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_cfm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_class: Option<PressureClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
    /// Set only by [`FittingEntity::from_request`]. Deserializing restores
    /// the flag from a persisted design store, which is trusted input; a
    /// record without it loads as a manual fitting.
    #[serde(default)]
    auto_inserted: bool,
}

impl FittingEntity {
    /// A fitting drawn by the user.
    pub fn manual(
        id: EntityId,
        fitting_type: FittingType,
        section: CrossSection,
        material: Material,
    ) -> Self {
        Self {
            id,
            fitting_type,
            section,
            outlet: None,
            material,
            angle_deg: None,
            length_in: None,
            airflow_cfm: None,
            pressure_class: None,
            service_id: None,
            auto_inserted: false,
        }
    }

    /// Materialize a committed request. The only path that yields an
    /// auto-inserted fitting.
    pub fn from_request(id: EntityId, request: &FittingRequest) -> Self {
        Self {
            id,
            fitting_type: request.fitting_type,
            section: request.section,
            outlet: request.outlet,
            material: request.material,
            angle_deg: request.angle_deg,
            length_in: request.length_in,
            airflow_cfm: None,
            pressure_class: None,
            service_id: request.service_id.clone(),
            auto_inserted: request.auto_inserted(),
        }
    }

    pub fn auto_inserted(&self) -> bool {
        self.auto_inserted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    AirHandler,
    Fan,
    Diffuser,
    Grille,
    Damper,
    Hood,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentEntity {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    /// Serialized as `equipment`; `kind` is the entity tag.
    #[serde(rename = "equipment")]
    pub kind: EquipmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<CrossSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airflow_cfm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<ServiceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Duct(DuctEntity),
    Fitting(FittingEntity),
    Equipment(EquipmentEntity),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Duct(d) => d.id,
            Entity::Fitting(f) => f.id,
            Entity::Equipment(e) => e.id,
        }
    }

    pub fn service_id(&self) -> Option<&ServiceId> {
        match self {
            Entity::Duct(d) => d.service_id.as_ref(),
            Entity::Fitting(f) => f.service_id.as_ref(),
            Entity::Equipment(e) => e.service_id.as_ref(),
        }
    }

    /// The section airflow passes through, if the entity has one.
    pub fn section(&self) -> Option<&CrossSection> {
        match self {
            Entity::Duct(d) => Some(&d.section),
            Entity::Fitting(f) => Some(&f.section),
            Entity::Equipment(e) => e.connection.as_ref(),
        }
    }

    pub fn material(&self) -> Option<Material> {
        match self {
            Entity::Duct(d) => Some(d.material),
            Entity::Fitting(f) => Some(f.material),
            Entity::Equipment(_) => None,
        }
    }

    pub fn pressure_class(&self) -> Option<PressureClass> {
        match self {
            Entity::Duct(d) => d.pressure_class,
            Entity::Fitting(f) => f.pressure_class,
            Entity::Equipment(_) => None,
        }
    }

    pub fn airflow_cfm(&self) -> Option<f64> {
        match self {
            Entity::Duct(d) => d.airflow_cfm,
            Entity::Fitting(f) => f.airflow_cfm,
            Entity::Equipment(e) => e.airflow_cfm,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Entity::Duct(_) => "duct",
            Entity::Fitting(_) => "fitting",
            Entity::Equipment(_) => "equipment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::FittingRequest;

    #[test]
    fn manual_fittings_are_not_auto_inserted() {
        let f = FittingEntity::manual(
            EntityId::from_index(0),
            FittingType::Tee,
            CrossSection::round(10.0),
            Material::GalvanizedSteel,
        );
        assert!(!f.auto_inserted());
    }

    #[test]
    fn materialized_requests_keep_the_flag() {
        let req = FittingRequest::new(
            FittingType::Elbow45,
            Material::Aluminum,
            CrossSection::round(8.0),
            0,
        )
        .with_angle(45.0);
        let f = FittingEntity::from_request(EntityId::from_index(3), &req);
        assert!(f.auto_inserted());
        assert_eq!(f.angle_deg, Some(45.0));
        assert_eq!(f.material, Material::Aluminum);
    }

    #[test]
    fn fitting_records_default_to_manual() {
        let yaml = r#"
kind: fitting
id: 4
fitting_type: tee
section: { shape: round, diameter_in: 10.0 }
material: galvanized_steel
"#;
        let e: Entity = serde_yaml::from_str(yaml).unwrap();
        let Entity::Fitting(f) = e else {
            panic!("expected a fitting");
        };
        assert!(!f.auto_inserted());
    }

    #[test]
    fn entity_yaml_is_tagged_by_kind() {
        let yaml = r#"
kind: duct
id: 12
section: { shape: round, diameter_in: 14.0 }
material: galvanized_steel
length_ft: 20.0
airflow_cfm: 900.0
service_id: supply
"#;
        let e: Entity = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(e.id().get(), 12);
        assert_eq!(e.kind_label(), "duct");
        assert_eq!(e.airflow_cfm(), Some(900.0));
        assert_eq!(e.service_id().map(|s| s.as_str()), Some("supply"));
    }

    #[test]
    fn equipment_kind_does_not_clash_with_tag() {
        let yaml = r#"
kind: equipment
id: 4
equipment: hood
connection: { shape: round, diameter_in: 10.0 }
"#;
        let e: Entity = serde_yaml::from_str(yaml).unwrap();
        let Entity::Equipment(eq) = e else {
            panic!("expected equipment");
        };
        assert_eq!(eq.kind, EquipmentKind::Hood);
    }
}
