//! Per-entity validation results and the ledger that tracks them.

use std::collections::BTreeMap;

use df_core::EntityId;
use df_model::{Severity, Violation};
use serde::{Deserialize, Serialize};

/// Result of one validation pass over one entity. Each pass replaces the
/// previous status wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintStatus {
    pub entity_id: EntityId,
    pub violations: Vec<Violation>,
}

/// Violations bucketed by severity, input order kept within each bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeverityGroups<'a> {
    pub errors: Vec<&'a Violation>,
    pub warnings: Vec<&'a Violation>,
    pub infos: Vec<&'a Violation>,
}

impl ConstraintStatus {
    pub fn new(entity_id: EntityId, violations: Vec<Violation>) -> Self {
        Self {
            entity_id,
            violations,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// An error keeps this entity, and only this entity, out of export and
    /// the BOM.
    pub fn blocks_export(&self) -> bool {
        self.violations.iter().any(Violation::is_blocking)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    pub fn grouped(&self) -> SeverityGroups<'_> {
        let mut groups = SeverityGroups::default();
        for v in &self.violations {
            match v.severity {
                Severity::Error => groups.errors.push(v),
                Severity::Warning => groups.warnings.push(v),
                Severity::Info => groups.infos.push(v),
            }
        }
        groups
    }

    /// Most severe violation, if any.
    pub fn worst(&self) -> Option<Severity> {
        self.violations.iter().map(|v| v.severity).min()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationState {
    Unchecked,
    Validated(ConstraintStatus),
}

impl ValidationState {
    pub fn status(&self) -> Option<&ConstraintStatus> {
        match self {
            ValidationState::Unchecked => None,
            ValidationState::Validated(status) => Some(status),
        }
    }
}

static UNCHECKED: ValidationState = ValidationState::Unchecked;

/// Caller-owned ledger of validation state per entity.
///
/// Entities start unchecked. Recording a status marks them validated; any
/// mutation of the entity must be followed by [`StatusBook::invalidate`].
#[derive(Debug, Clone, Default)]
pub struct StatusBook {
    states: BTreeMap<EntityId, ValidationState>,
}

impl StatusBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, id: EntityId) {
        self.states.entry(id).or_insert(ValidationState::Unchecked);
    }

    pub fn record(&mut self, status: ConstraintStatus) {
        self.states
            .insert(status.entity_id, ValidationState::Validated(status));
    }

    pub fn record_all(&mut self, statuses: impl IntoIterator<Item = ConstraintStatus>) {
        for status in statuses {
            self.record(status);
        }
    }

    pub fn invalidate(&mut self, id: EntityId) {
        self.states.insert(id, ValidationState::Unchecked);
    }

    pub fn remove(&mut self, id: EntityId) {
        self.states.remove(&id);
    }

    pub fn state(&self, id: EntityId) -> &ValidationState {
        self.states
            .get(&id)
            .unwrap_or(&UNCHECKED)
    }

    pub fn status(&self, id: EntityId) -> Option<&ConstraintStatus> {
        self.state(id).status()
    }

    /// Validated with no error. Unchecked entities never export.
    pub fn is_exportable(&self, id: EntityId) -> bool {
        self.status(id).is_some_and(|s| !s.blocks_export())
    }

    pub fn unchecked(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.states
            .iter()
            .filter(|(_, s)| matches!(s, ValidationState::Unchecked))
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
