//! Design snapshot loading, saving and validation.
//!
//! A snapshot is a fixture for the tooling: the constraint profile, the
//! entities drawn so far, the junctions to resolve and an optional price
//! book, all in one YAML file.

use std::collections::HashSet;
use std::path::Path;

use df_bom::PriceBook;
use df_core::EntityId;
use df_model::{ConstraintProfile, Entity, ServiceId, validate_profile};
use df_topology::ConnectionPoint;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSnapshot {
    pub profile: ConstraintProfile,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub junctions: Vec<JunctionDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<PriceBook>,
}

/// Duct ends meeting at one point, waiting for fittings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JunctionDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceId>,
    /// Overrides the largest-area primary run pick. Junctions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_run: Option<usize>,
    pub connections: Vec<ConnectionPoint>,
}

impl DesignSnapshot {
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn junction(&self, id: &str) -> AppResult<&JunctionDef> {
        self.junctions
            .iter()
            .find(|j| j.id == id)
            .ok_or_else(|| AppError::JunctionNotFound(id.to_string()))
    }

    /// First id above every entity already in the snapshot.
    pub fn next_entity_id(&self) -> EntityId {
        let max = self.entities.iter().map(|e| e.id().get()).max().unwrap_or(0);
        EntityId::from_index(max)
    }
}

/// Load a design snapshot from a YAML file and validate it.
pub fn load_design(path: &Path) -> AppResult<DesignSnapshot> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::DesignFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let design = design_from_yaml_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        entities = design.entities.len(),
        junctions = design.junctions.len(),
        "design loaded"
    );
    Ok(design)
}

pub fn design_from_yaml_str(content: &str) -> AppResult<DesignSnapshot> {
    let design: DesignSnapshot = serde_yaml::from_str(content)
        .map_err(|e| AppError::Design(format!("Failed to parse design YAML: {}", e)))?;
    validate_design(&design)?;
    Ok(design)
}

/// Save a design snapshot to a YAML file.
pub fn save_design(path: &Path, design: &DesignSnapshot) -> AppResult<()> {
    validate_design(design)?;
    let content = serde_yaml::to_string(design)
        .map_err(|e| AppError::Design(format!("Failed to serialize design: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::DesignFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Structural checks only. Design problems are the validation engine's job.
pub fn validate_design(design: &DesignSnapshot) -> AppResult<()> {
    validate_profile(&design.profile)?;

    let mut ids = HashSet::new();
    for entity in &design.entities {
        if !ids.insert(entity.id()) {
            return Err(AppError::Validation(format!(
                "Duplicate entity id {}",
                entity.id()
            )));
        }
    }

    let mut junction_ids = HashSet::new();
    for junction in &design.junctions {
        if !junction_ids.insert(junction.id.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate junction id '{}'",
                junction.id
            )));
        }
        if junction.connections.is_empty() {
            return Err(AppError::Validation(format!(
                "Junction '{}' must have at least one connection",
                junction.id
            )));
        }
        if let Some(service) = &junction.service
            && design.profile.service(service).is_none()
        {
            return Err(AppError::Validation(format!(
                "Junction '{}' references unknown service '{}'",
                junction.id, service
            )));
        }
        if let Some(index) = junction.primary_run
            && index >= junction.connections.len()
        {
            return Err(AppError::Validation(format!(
                "Junction '{}' primary run {} is out of range (0..{})",
                junction.id,
                index,
                junction.connections.len()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
profile:
  version: 1
  name: Minimal
entities:
  - kind: duct
    id: 3
    section: { shape: round, diameter_in: 12.0 }
    material: galvanized_steel
    length_ft: 10.0
junctions:
  - id: cap
    connections:
      - position: [0.0, 0.0]
        direction: [1.0, 0.0]
        section: { shape: round, diameter_in: 12.0 }
        owner: 3
        material: galvanized_steel
"#;

    #[test]
    fn parses_minimal_design() {
        let design = design_from_yaml_str(MINIMAL).unwrap();
        assert_eq!(design.entities.len(), 1);
        assert_eq!(design.junctions[0].connections.len(), 1);
        assert!(design.prices.is_none());
        assert_eq!(design.next_entity_id().get(), 4);
    }

    #[test]
    fn next_id_on_empty_design_is_one() {
        let design = DesignSnapshot {
            profile: ConstraintProfile::default(),
            entities: Vec::new(),
            junctions: Vec::new(),
            prices: None,
        };
        assert_eq!(design.next_entity_id().get(), 1);
    }

    #[test]
    fn duplicate_entity_ids_are_rejected() {
        let mut design = design_from_yaml_str(MINIMAL).unwrap();
        let copy = design.entities[0].clone();
        design.entities.push(copy);
        assert!(matches!(
            validate_design(&design),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn unknown_junction_service_is_rejected() {
        let mut design = design_from_yaml_str(MINIMAL).unwrap();
        design.junctions[0].service = Some(ServiceId::new("grease"));
        let err = validate_design(&design).unwrap_err();
        assert!(err.to_string().contains("unknown service"));
    }

    #[test]
    fn primary_run_out_of_range_is_rejected() {
        let mut design = design_from_yaml_str(MINIMAL).unwrap();
        design.junctions[0].primary_run = Some(1);
        assert!(validate_design(&design).is_err());
    }

    #[test]
    fn missing_junction_is_reported() {
        let design = design_from_yaml_str(MINIMAL).unwrap();
        assert!(matches!(
            design.junction("nope"),
            Err(AppError::JunctionNotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn bad_yaml_is_a_design_error() {
        let err = design_from_yaml_str("profile: [").unwrap_err();
        assert!(matches!(err, AppError::Design(_)));
    }
}
