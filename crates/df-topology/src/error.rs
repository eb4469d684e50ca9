//! Classification errors.

use df_core::DfError;
use thiserror::Error;

pub type TopologyResult<T> = Result<T, TopologyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    #[error("No connection points to classify")]
    Empty,

    #[error("Connection {index} has a zero-length or non-finite direction vector")]
    DegenerateDirection { index: usize },

    #[error("Connection {index} has a non-finite position")]
    NonFinitePosition { index: usize },

    #[error("Connection {index} has an invalid cross section: {reason}")]
    InvalidSection { index: usize, reason: String },

    #[error("Primary run index {index} out of range for {len} connections")]
    PrimaryRunOutOfRange { index: usize, len: usize },

    #[error("Primary run can only be overridden on a junction, not a {kind}")]
    NotAJunction { kind: &'static str },

    #[error("Branch index {index} is invalid: {reason}")]
    InvalidBranch { index: usize, reason: &'static str },
}

impl From<TopologyError> for DfError {
    fn from(err: TopologyError) -> Self {
        DfError::Invariant {
            what: err.to_string(),
        }
    }
}
