//! Violation records produced by sizing checks and the validation engine.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Ordered most severe first, so sorting ranks errors at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Shape,
    Material,
    Dimension,
    AspectRatio,
    Velocity,
    PressureClass,
    FittingRule,
    Geometry,
    UnknownService,
    MissingData,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::Shape => "shape",
            ViolationKind::Material => "material",
            ViolationKind::Dimension => "dimension",
            ViolationKind::AspectRatio => "aspect_ratio",
            ViolationKind::Velocity => "velocity",
            ViolationKind::PressureClass => "pressure_class",
            ViolationKind::FittingRule => "fitting_rule",
            ViolationKind::Geometry => "geometry",
            ViolationKind::UnknownService => "unknown_service",
            ViolationKind::MissingData => "missing_data",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fix the UI may offer.
///
/// `Patch` is only produced when a single scalar property change resolves the
/// violation; anything broader is `Text` guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SuggestedFix {
    Text { guidance: String },
    Patch { property: String, value: f64 },
}

impl SuggestedFix {
    pub fn text(guidance: impl Into<String>) -> Self {
        SuggestedFix::Text {
            guidance: guidance.into(),
        }
    }

    pub fn patch(property: impl Into<String>, value: f64) -> Self {
        SuggestedFix::Patch {
            property: property.into(),
            value,
        }
    }

    pub fn is_patch(&self) -> bool {
        matches!(self, SuggestedFix::Patch { .. })
    }
}

impl fmt::Display for SuggestedFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestedFix::Text { guidance } => f.write_str(guidance),
            SuggestedFix::Patch { property, value } => write!(f, "set {property} to {value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<SuggestedFix>,
}

impl Violation {
    pub fn new(kind: ViolationKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            severity,
            suggested_fix: None,
        }
    }

    pub fn error(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    pub fn warning(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn info(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Info, message)
    }

    pub fn with_fix(mut self, fix: SuggestedFix) -> Self {
        self.suggested_fix = Some(fix);
        self
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.kind, self.message)
    }
}
