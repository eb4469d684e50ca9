//! Error types for fitting resolution.

use df_core::DfError;
use df_topology::TopologyError;
use thiserror::Error;

/// Why a commit was refused. A refused commit inserts nothing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("Geometry impossible: {reason}")]
    GeometryImpossible { reason: String },

    #[error("Service rule violation: {reason}")]
    ServiceRuleViolation { reason: String },

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}

pub type ResolutionResult<T> = Result<T, ResolutionError>;

impl From<ResolutionError> for DfError {
    fn from(e: ResolutionError) -> Self {
        match e {
            ResolutionError::Topology(inner) => inner.into(),
            other => DfError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
