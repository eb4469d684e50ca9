//! Whole-design validation.

use std::collections::BTreeMap;

use df_core::EntityId;
use df_model::Severity;
use df_validate::{ConstraintStatus, StatusBook, validate_all, validate_all_par};

use crate::snapshot::DesignSnapshot;

/// Per-entity statuses from one validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub statuses: BTreeMap<EntityId, ConstraintStatus>,
}

impl CheckReport {
    /// Violations of `severity` across every entity.
    pub fn count(&self, severity: Severity) -> usize {
        self.statuses.values().map(|s| s.count(severity)).sum()
    }

    pub fn blocked(&self) -> impl Iterator<Item = &ConstraintStatus> {
        self.statuses.values().filter(|s| s.blocks_export())
    }

    pub fn is_exportable(&self) -> bool {
        self.blocked().next().is_none()
    }

    /// Ledger with every checked entity marked validated.
    pub fn status_book(&self) -> StatusBook {
        let mut book = StatusBook::new();
        book.record_all(self.statuses.values().cloned());
        book
    }
}

/// Validate every entity against the design's profile.
pub fn check_design(design: &DesignSnapshot, parallel: bool) -> CheckReport {
    let statuses = if parallel {
        validate_all_par(&design.entities, &design.profile)
    } else {
        validate_all(&design.entities, &design.profile)
    };
    CheckReport { statuses }
}
