//! Ghost preview packaging.

use df_model::FittingType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureType {
    GeometryImpossible,
    ServiceViolation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostColor {
    Green,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewFitting {
    pub fitting_type: FittingType,
    pub sequence_index: usize,
}

/// What the UI draws while the user hovers a junction. Recomputed every
/// tick and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingPreview {
    pub fittings: Vec<PreviewFitting>,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_failure_type: Option<FailureType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
    pub tooltip_text: String,
    pub ghost_color: GhostColor,
}

impl FittingPreview {
    pub(crate) fn valid(fittings: Vec<PreviewFitting>, tooltip_text: String) -> Self {
        Self {
            fittings,
            is_valid: true,
            validation_failure_type: None,
            invalid_reason: None,
            tooltip_text,
            ghost_color: GhostColor::Green,
        }
    }

    pub(crate) fn invalid(
        fittings: Vec<PreviewFitting>,
        failure: FailureType,
        reason: String,
    ) -> Self {
        let prefix = match failure {
            FailureType::GeometryImpossible => "Cannot fit",
            FailureType::ServiceViolation => "Not allowed",
        };
        Self {
            fittings,
            is_valid: false,
            validation_failure_type: Some(failure),
            tooltip_text: format!("{prefix}: {reason}"),
            invalid_reason: Some(reason),
            ghost_color: GhostColor::Red,
        }
    }
}
